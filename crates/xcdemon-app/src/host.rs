//! Host capability interface
//!
//! Everything the controller needs from the surface it runs in: messages,
//! a single-choice prompt, the panel, and a terminal to run commands in.
//! The TUI and headless runners each provide one; tests use a fake.

use serde::{Deserialize, Serialize};

use xcdemon_core::prelude::*;
use xcdemon_toolchain::ToolCommand;

use crate::message::PanelMessage;

/// Severity of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Error,
}

#[trait_variant::make(Host: Send)]
pub trait LocalHost {
    /// Show a transient message to the user
    fn show_message(&self, level: MessageLevel, message: &str);

    /// Ask the user to choose one of `items`
    ///
    /// Returns the chosen item, or `None` if the user cancelled.
    async fn pick(&self, placeholder: &str, items: &[String]) -> Option<String>;

    /// Push a message to the panel
    fn post(&self, message: &PanelMessage);

    /// Run a command in the named terminal and wait for it to finish
    ///
    /// Returns the exit code (`None` when killed by a signal). Errors mean
    /// the command could not be started.
    async fn run_in_terminal(&self, terminal: &str, command: &ToolCommand) -> Result<Option<i32>>;
}
