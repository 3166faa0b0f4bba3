//! xcdemon-app - Application state and orchestration for Xcode Demon
//!
//! This crate holds the state store, the controller that turns panel requests
//! into discovery passes and tool invocations, the run pipeline, the Engine
//! shared by the TUI and headless runners, and configuration loading.

pub mod config;
pub mod controller;
pub mod engine;
pub mod host;
pub mod message;
pub mod pipeline;
pub mod state;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

// Re-export primary types
pub use config::Settings;
pub use controller::Controller;
pub use engine::Engine;
pub use host::{Host, LocalHost, MessageLevel};
pub use message::{Message, PaletteCommand, PanelMessage, PanelRequest, ProjectInfo};
pub use pipeline::{PipelineReport, RunPipeline, RunStep, StepOutcome};
pub use state::{AppState, Readiness};

// Re-export toolchain types for the runners
pub use xcdemon_toolchain::{ToolAvailability, ToolCommand};
