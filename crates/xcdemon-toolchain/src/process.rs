//! External tool invocation
//!
//! Every tool call is described as a program plus an ordered argument list.
//! Nothing is ever passed through a shell, so project names and paths with
//! spaces or quotes reach the tool intact.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use xcdemon_core::prelude::*;

/// A program invocation as an argument vector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument
    ///
    /// Non-UTF-8 bytes are replaced; Xcode itself rejects such paths.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }
}

/// Renders a copy-pasteable shell line, quoting arguments that need it
impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Quote a word for POSIX shells if it contains anything but safe characters
pub fn shell_quote(word: &str) -> Cow<'_, str> {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,@+%".contains(c));

    if safe {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into an error
    pub fn into_success(self, program: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            if !self.stderr.is_empty() {
                debug!("{} stderr: {}", program, self.stderr.trim_end());
            }
            Err(Error::process_exit(program, self.code))
        }
    }
}

/// Runs external commands to completion
///
/// The process-execution seam: discovery and the run pipeline only ever talk
/// to tools through this trait, so tests substitute a scripted runner.
#[trait_variant::make(ProcessRunner: Send)]
pub trait LocalProcessRunner {
    /// Run a command and capture its full output
    ///
    /// A non-zero exit is *not* an error here; inspect [`ToolOutput::code`].
    /// Errors are reserved for failing to run the program at all.
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput>;
}

/// Map a failure to start `program` to the matching error
///
/// A missing executable becomes [`Error::ToolNotFound`].
pub fn spawn_error(program: &str, error: std::io::Error) -> Error {
    if error.kind() == std::io::ErrorKind::NotFound {
        Error::tool_not_found(program)
    } else {
        Error::process_spawn(program, error.to_string())
    }
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill commands that run longer than `duration`
    pub fn with_timeout(duration: Duration) -> Self {
        Self {
            timeout: Some(duration),
        }
    }
}

impl ProcessRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        debug!("Running: {}", command);

        let child_output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let result = match self.timeout {
            Some(duration) => timeout(duration, child_output)
                .await
                .map_err(|_| Error::timeout(&command.program, duration.as_secs()))?,
            None => child_output.await,
        };

        let output = result.map_err(|e| spawn_error(&command.program, e))?;

        let output = ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        trace!("{} exited with {:?}", command.program, output.code);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    // Only the Send variant is imported so `run` resolves unambiguously
    use super::{shell_quote, spawn_error, ProcessRunner, SystemRunner, ToolCommand, ToolOutput};
    use std::path::Path;
    use std::time::Duration;
    use xcdemon_core::Error;

    #[test]
    fn test_command_builder() {
        let cmd = ToolCommand::new("xcrun")
            .arg("simctl")
            .args(["boot", "ABC-123"]);

        assert_eq!(cmd.program, "xcrun");
        assert_eq!(cmd.args, vec!["simctl", "boot", "ABC-123"]);
    }

    #[test]
    fn test_display_quotes_only_when_needed() {
        let cmd = ToolCommand::new("xcodebuild")
            .arg("-project")
            .path_arg(Path::new("/work/My App.xcodeproj"))
            .arg("-destination")
            .arg("platform=iOS Simulator,id=ABC");

        assert_eq!(
            cmd.to_string(),
            "xcodebuild -project '/work/My App.xcodeproj' -destination 'platform=iOS Simulator,id=ABC'"
        );
    }

    #[test]
    fn test_shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("plain-word_1.2"), "plain-word_1.2");
    }

    #[test]
    fn test_spawn_error_kinds() {
        let missing = std::io::Error::from(std::io::ErrorKind::NotFound);
        assert!(matches!(spawn_error("xcrun", missing), Error::ToolNotFound { .. }));

        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert!(matches!(
            spawn_error("xcrun", denied),
            Error::ProcessSpawn { .. }
        ));
    }

    #[test]
    fn test_tool_output_success() {
        assert!(ToolOutput::ok("").success());
        assert!(!ToolOutput::failed(65, "boom").success());
        assert!(!ToolOutput::default().success());
    }

    #[test]
    fn test_into_success_maps_exit_code() {
        let err = ToolOutput::failed(70, "boom")
            .into_success("xcodebuild")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ProcessExit {
                code: Some(70),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_system_runner_reports_missing_tool() {
        let runner = SystemRunner::new();
        let cmd = ToolCommand::new("xcdemon-definitely-not-a-real-tool");

        let err = runner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_captures_output_and_code() {
        let runner = SystemRunner::new();
        let cmd = ToolCommand::new("sh").args(["-c", "echo hello; echo oops >&2; exit 3"]);

        let output = runner.run(&cmd).await.unwrap();
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_passes_arguments_verbatim() {
        let runner = SystemRunner::new();
        let cmd = ToolCommand::new("printf").args(["%s", "a \"quoted\" $HOME arg"]);

        let output = runner.run(&cmd).await.unwrap();
        assert_eq!(output.stdout, "a \"quoted\" $HOME arg");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_timeout() {
        let runner = SystemRunner::with_timeout(Duration::from_millis(50));
        let cmd = ToolCommand::new("sleep").arg("5");

        let err = runner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }
}
