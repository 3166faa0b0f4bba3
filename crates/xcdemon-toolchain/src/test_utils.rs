//! Test utilities for toolchain consumers
//!
//! Provides a scripted [`FakeRunner`] and helpers for creating test devices.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use xcdemon_core::prelude::*;
use xcdemon_core::Device;

use crate::process::{ProcessRunner, ToolCommand, ToolOutput};

/// Exit code returned for commands with no scripted response
pub const UNEXPECTED_COMMAND_CODE: i32 = 127;

/// A [`ProcessRunner`] that answers from a script instead of spawning processes
///
/// Responses are matched on the exact argument vector. Commands with no
/// scripted response exit with [`UNEXPECTED_COMMAND_CODE`]. Every call is
/// recorded in order.
#[derive(Debug, Default)]
pub struct FakeRunner {
    responses: HashMap<ToolCommand, ToolOutput>,
    missing_tools: HashSet<String>,
    calls: Mutex<Vec<ToolCommand>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the output of one command
    pub fn respond(mut self, command: ToolCommand, output: ToolOutput) -> Self {
        self.responses.insert(command, output);
        self
    }

    /// Make every invocation of `program` fail as if it were not installed
    pub fn missing_tool(mut self, program: &str) -> Self {
        self.missing_tools.insert(program.to_string());
        self
    }

    /// Commands run so far, in order
    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ProcessRunner for FakeRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }

        if self.missing_tools.contains(&command.program) {
            return Err(Error::tool_not_found(&command.program));
        }

        Ok(self.responses.get(command).cloned().unwrap_or_else(|| {
            ToolOutput::failed(
                UNEXPECTED_COMMAND_CODE,
                format!("unexpected command: {}", command),
            )
        }))
    }
}

/// Creates a test simulator on the iOS 17 runtime
pub fn test_device(id: &str, name: &str) -> Device {
    test_device_with_os(id, name, "iOS-17-0")
}

/// Creates a test simulator on a specific runtime label
pub fn test_device_with_os(id: &str, name: &str, os_label: &str) -> Device {
    Device::simulator(id, name, os_label)
}
