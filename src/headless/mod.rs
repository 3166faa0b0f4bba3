//! Headless mode - NDJSON events instead of the TUI
//!
//! Everything the panel would show is written to stdout as newline-delimited
//! JSON, one event per line. Each event has an "event" field naming its type.
//! Requests are read from stdin (see [`runner`]).
//!
//! # Example Output
//!
//! ```json
//! {"event":"update_content","project_info":{"name":"Foo","selectedScheme":"","selectedDevice":null,"schemes":["Foo"],"devices":[]}}
//! {"event":"choice","placeholder":"Select a scheme","items":["Foo"],"timestamp":1704700001000}
//! {"event":"message","level":"info","message":"Building Foo","timestamp":1704700002000}
//! {"event":"terminal_output","terminal":"XcDemon","stream":"stdout","line":"** BUILD SUCCEEDED **","timestamp":1704700003000}
//! ```

pub mod host;
pub mod runner;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use tracing::error;

use xcdemon_app::{MessageLevel, PanelMessage, ProjectInfo};

pub use host::HeadlessHost;
pub use runner::run_headless;

/// Which output stream of a terminal command a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Panel snapshot; `project_info` is null when there is no project
    UpdateContent { project_info: Option<ProjectInfo> },

    /// Transient user-visible message
    Message {
        level: MessageLevel,
        message: String,
        timestamp: i64,
    },

    /// The controller is waiting for a `choice` request
    Choice {
        placeholder: String,
        items: Vec<String>,
        timestamp: i64,
    },

    /// A terminal command started
    TerminalStarted {
        terminal: String,
        command: String,
        timestamp: i64,
    },

    /// One line of terminal command output
    TerminalOutput {
        terminal: String,
        stream: OutputStream,
        line: String,
        timestamp: i64,
    },

    /// A terminal command finished; `code` is null when killed by a signal
    TerminalExited {
        terminal: String,
        command: String,
        code: Option<i32>,
        timestamp: i64,
    },

    /// Error outside the controller's own messages
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

/// Shared NDJSON writer
///
/// Every event goes through one lock so lines from the engine and the stdin
/// reader never interleave.
pub struct EventSink<W = io::Stdout> {
    out: Arc<Mutex<W>>,
}

impl<W> Clone for EventSink<W> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
        }
    }
}

impl EventSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> EventSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub fn emit(&self, event: &HeadlessEvent) {
        match self.out.lock() {
            Ok(mut out) => event.write_to(&mut *out),
            Err(e) => error!("Headless output poisoned: {}", e),
        }
    }

    /// The writer, once every other handle is gone
    #[cfg(test)]
    pub(crate) fn into_inner(self) -> Option<W> {
        let out = Arc::try_unwrap(self.out).ok()?;
        Some(match out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        })
    }
}

impl HeadlessEvent {
    /// Write this event as one NDJSON line and flush
    pub fn write_to<W: Write>(&self, out: &mut W) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(out, "{}", json) {
            error!("Failed to write headless event: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = out.flush() {
            error!("Failed to flush headless output: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn update_content(message: &PanelMessage) -> Self {
        Self::UpdateContent {
            project_info: message.project_info().cloned(),
        }
    }

    pub fn message(level: MessageLevel, message: &str) -> Self {
        Self::Message {
            level,
            message: message.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn choice(placeholder: &str, items: &[String]) -> Self {
        Self::Choice {
            placeholder: placeholder.to_string(),
            items: items.to_vec(),
            timestamp: Self::now(),
        }
    }

    pub fn terminal_started(terminal: &str, command: &str) -> Self {
        Self::TerminalStarted {
            terminal: terminal.to_string(),
            command: command.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn terminal_output(terminal: &str, stream: OutputStream, line: String) -> Self {
        Self::TerminalOutput {
            terminal: terminal.to_string(),
            stream,
            line,
            timestamp: Self::now(),
        }
    }

    pub fn terminal_exited(terminal: &str, command: &str, code: Option<i32>) -> Self {
        Self::TerminalExited {
            terminal: terminal.to_string(),
            command: command.to_string(),
            code,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}
