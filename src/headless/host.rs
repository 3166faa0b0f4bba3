//! Headless host
//!
//! Answers the controller's host calls with NDJSON events. Choices arrive
//! from stdin through a channel; terminal commands run as child processes
//! whose output is forwarded line by line.

use std::io::{self, Write};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use xcdemon_app::{Host, MessageLevel, PanelMessage, ToolCommand};
use xcdemon_core::prelude::*;
use xcdemon_toolchain::spawn_error;

use super::{EventSink, HeadlessEvent, OutputStream};

pub struct HeadlessHost<W = io::Stdout> {
    sink: EventSink<W>,

    /// Answers to `choice` events; `None` cancels
    choices: Mutex<mpsc::Receiver<Option<usize>>>,
}

impl HeadlessHost<io::Stdout> {
    pub fn stdout(choices: mpsc::Receiver<Option<usize>>) -> Self {
        Self::new(EventSink::stdout(), choices)
    }
}

impl<W: Write + Send> HeadlessHost<W> {
    pub fn new(sink: EventSink<W>, choices: mpsc::Receiver<Option<usize>>) -> Self {
        Self {
            sink,
            choices: Mutex::new(choices),
        }
    }

    pub fn emit(&self, event: &HeadlessEvent) {
        self.sink.emit(event);
    }

    /// A handle for writing events from outside the engine
    pub fn sink(&self) -> EventSink<W> {
        self.sink.clone()
    }

    /// Forward each line from a child stream as a `terminal_output` event
    async fn forward_lines<R>(&self, reader: Option<R>, terminal: &str, stream: OutputStream)
    where
        R: AsyncRead + Unpin,
    {
        let Some(reader) = reader else {
            return;
        };

        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => self.emit(&HeadlessEvent::terminal_output(terminal, stream, line)),
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed reading {:?} of terminal command: {}", stream, e);
                    break;
                }
            }
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.sink
            .into_inner()
            .expect("event sink still shared")
    }
}

impl<W: Write + Send> Host for HeadlessHost<W> {
    fn show_message(&self, level: MessageLevel, message: &str) {
        info!("[{:?}] {}", level, message);
        self.emit(&HeadlessEvent::message(level, message));
    }

    async fn pick(&self, placeholder: &str, items: &[String]) -> Option<String> {
        let mut choices = self.choices.lock().await;

        // Only answers to this prompt count
        while let Ok(stale) = choices.try_recv() {
            debug!("Dropping choice {:?} sent while no prompt was open", stale);
        }

        self.emit(&HeadlessEvent::choice(placeholder, items));

        let answer = choices.recv().await.flatten();
        match answer {
            Some(index) if index < items.len() => Some(items[index].clone()),
            Some(index) => {
                warn!("Choice {} out of range for {} items", index, items.len());
                None
            }
            None => None,
        }
    }

    fn post(&self, message: &PanelMessage) {
        self.emit(&HeadlessEvent::update_content(message));
    }

    async fn run_in_terminal(&self, terminal: &str, command: &ToolCommand) -> Result<Option<i32>> {
        let rendered = command.to_string();
        info!("[{}] {}", terminal, rendered);
        self.emit(&HeadlessEvent::terminal_started(terminal, &rendered));

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(&command.program, e))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (_, _, status) = tokio::join!(
            self.forward_lines(stdout, terminal, OutputStream::Stdout),
            self.forward_lines(stderr, terminal, OutputStream::Stderr),
            child.wait(),
        );
        let code = status
            .with_context(|| format!("Waiting for `{}` in {}", rendered, terminal))?
            .code();

        self.emit(&HeadlessEvent::terminal_exited(terminal, &rendered, code));
        Ok(code)
    }
}
