//! # xcdemon-toolchain - Xcode Tool Invocation
//!
//! Runs `xcodebuild` and `xcrun simctl`, parses their output, and builds the
//! argument vectors for build, clean and run.
//!
//! Depends on [`xcdemon_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Process Contract
//! - [`ToolCommand`] - Program plus ordered argument list (never a shell string)
//! - [`ToolOutput`] - Exit code and captured output
//! - [`ProcessRunner`] / [`LocalProcessRunner`] - The process-execution seam
//! - [`SystemRunner`] - Runs real child processes via tokio
//!
//! ### Discovery
//! - [`list_schemes()`] - Schemes from `xcodebuild -list`
//! - [`list_devices()`] - Available iOS simulators from `simctl`
//! - [`project_info()`] - Compose name, schemes and devices into a [`Project`](xcdemon_core::Project)
//!
//! ### Command Construction
//! - [`commands`] - Build, clean, boot, install and launch invocations
//!
//! ### Platform Utilities
//! - [`ToolAvailability`] - Check for `xcodebuild` and `xcrun simctl`

pub mod commands;
pub mod process;
pub mod project;
pub mod schemes;
pub mod simulators;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod tool_availability;

// Public API re-exports
pub use commands::{locate_app_bundle, BuildAction};
pub use process::{
    shell_quote, spawn_error, LocalProcessRunner, ProcessRunner, SystemRunner, ToolCommand,
    ToolOutput,
};
pub use project::project_info;
pub use schemes::{list_schemes, parse_schemes};
pub use simulators::{list_devices, parse_devices_output};
pub use tool_availability::ToolAvailability;
