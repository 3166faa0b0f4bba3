//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // External Tool Errors
    // ─────────────────────────────────────────────────────────────
    #[error("'{tool}' not found. Ensure Xcode command line tools are installed.")]
    ToolNotFound { tool: String },

    #[error("Failed to spawn '{program}': {reason}")]
    ProcessSpawn { program: String, reason: String },

    #[error("'{program}' exited with code: {code:?}")]
    ProcessExit { program: String, code: Option<i32> },

    #[error("'{program}' timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("Tool output error: {message}")]
    Protocol { message: String },

    // ─────────────────────────────────────────────────────────────
    // Project Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Not a valid project descriptor: {path}")]
    InvalidDescriptor { path: PathBuf },

    #[error("Discovery error: {message}")]
    Discovery { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    pub fn process_spawn(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProcessSpawn {
            program: program.into(),
            reason: reason.into(),
        }
    }

    pub fn process_exit(program: impl Into<String>, code: Option<i32>) -> Self {
        Self::ProcessExit {
            program: program.into(),
            code,
        }
    }

    pub fn timeout(program: impl Into<String>, secs: u64) -> Self {
        Self::Timeout {
            program: program.into(),
            secs,
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn invalid_descriptor(path: impl Into<PathBuf>) -> Self {
        Self::InvalidDescriptor { path: path.into() }
    }

    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Tool failures degrade the data they were meant to produce; the panel
    /// keeps running.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ToolNotFound { .. }
                | Error::ProcessSpawn { .. }
                | Error::ProcessExit { .. }
                | Error::Timeout { .. }
                | Error::Protocol { .. }
                | Error::Json(_)
                | Error::InvalidDescriptor { .. }
                | Error::Discovery { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::TerminalInit(_) | Error::ChannelClosed)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
