//! Headless mode runner - engine loop driven by stdin
//!
//! Stdin carries one request per line, either JSON or a short word:
//!
//! ```text
//! {"type":"selectScheme"}            s | scheme
//! {"type":"runApp"}                  run
//! {"type":"focusPanel"}
//! {"type":"visibility","visible":false}
//! {"type":"choice","index":0}        0, 1, 2, ... | cancel
//! {"type":"quit"}                    q | quit
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use xcdemon_app::{Engine, Message, PaletteCommand, PanelRequest};
use xcdemon_core::prelude::*;

use super::{EventSink, HeadlessEvent, HeadlessHost};

/// Capacity of the choice channel
const CHOICE_CAPACITY: usize = 16;

/// Requests that only exist in headless mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum ControlRequest {
    Visibility { visible: bool },
    Choice { index: Option<usize> },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum JsonRequest {
    Panel(PanelRequest),
    Palette(PaletteCommand),
    Control(ControlRequest),
}

/// A parsed stdin line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessInput {
    /// Goes to the engine
    Message(Message),
    /// Answers the pending choice; `None` cancels
    Choice(Option<usize>),
}

/// Parse one stdin line
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_input(line: &str) -> Result<Option<HeadlessInput>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.starts_with('{') {
        let request: JsonRequest = serde_json::from_str(trimmed)
            .map_err(|e| Error::protocol(format!("Invalid request '{}': {}", trimmed, e)))?;
        let input = match request {
            JsonRequest::Panel(request) => HeadlessInput::Message(request.into()),
            JsonRequest::Palette(command) => HeadlessInput::Message(command.into()),
            JsonRequest::Control(ControlRequest::Visibility { visible }) => {
                HeadlessInput::Message(Message::VisibilityChanged(visible))
            }
            JsonRequest::Control(ControlRequest::Choice { index }) => HeadlessInput::Choice(index),
            JsonRequest::Control(ControlRequest::Quit) => HeadlessInput::Message(Message::Quit),
        };
        return Ok(Some(input));
    }

    if let Ok(index) = trimmed.parse::<usize>() {
        return Ok(Some(HeadlessInput::Choice(Some(index))));
    }

    let message: Message = match trimmed {
        "r" | "refresh" => PanelRequest::Refresh.into(),
        "s" | "scheme" => PanelRequest::SelectScheme.into(),
        "d" | "device" => PanelRequest::SelectDevice.into(),
        "run" => PanelRequest::RunApp.into(),
        "b" | "build" => PanelRequest::BuildApp.into(),
        "c" | "clean" => PanelRequest::CleanBuild.into(),
        "focus" => PaletteCommand::FocusPanel.into(),
        "q" | "quit" => Message::Quit,
        "cancel" => return Ok(Some(HeadlessInput::Choice(None))),
        _ => {
            return Err(Error::protocol(format!(
                "Unknown stdin command: {}",
                trimmed
            )))
        }
    };
    Ok(Some(HeadlessInput::Message(message)))
}

/// Run in headless mode - output NDJSON events instead of the TUI
pub async fn run_headless(workspace_roots: Vec<PathBuf>) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Xcode Demon starting in HEADLESS mode");
    info!("Workspace roots: {:?}", workspace_roots);
    info!("═══════════════════════════════════════════════════════");

    let (choice_tx, choice_rx) = mpsc::channel(CHOICE_CAPACITY);
    let mut engine = Engine::new(workspace_roots, HeadlessHost::stdout(choice_rx)).await;

    for message in engine.state().tools.unavailable_messages() {
        engine
            .host()
            .emit(&HeadlessEvent::error(message.to_string(), false));
    }

    let msg_tx = engine.msg_tx.clone();
    let sink = engine.host().sink();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(msg_tx, choice_tx, sink);
    });

    engine.run().await;

    info!("Xcode Demon headless mode exiting");
    Ok(())
}

/// Read stdin lines and route them to the engine or the pending choice
fn spawn_stdin_reader_blocking<W: Write>(
    msg_tx: mpsc::Sender<Message>,
    choice_tx: mpsc::Sender<Option<usize>>,
    sink: EventSink<W>,
) {
    let stdin = std::io::stdin();
    read_requests(stdin.lock(), &msg_tx, &choice_tx, &sink);

    // EOF ends the session
    let _ = msg_tx.blocking_send(Message::Quit);
    info!("Stdin reader exiting");
}

/// Route each request line until EOF, `quit`, or a closed channel
///
/// Unparseable lines are reported as non-fatal `error` events.
fn read_requests<R: BufRead, W: Write>(
    reader: R,
    msg_tx: &mpsc::Sender<Message>,
    choice_tx: &mpsc::Sender<Option<usize>>,
    sink: &EventSink<W>,
) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let sent = match parse_input(&line) {
            Ok(Some(HeadlessInput::Message(Message::Quit))) => {
                let _ = msg_tx.blocking_send(Message::Quit);
                break;
            }
            Ok(Some(HeadlessInput::Message(message))) => msg_tx.blocking_send(message).is_ok(),
            Ok(Some(HeadlessInput::Choice(choice))) => choice_tx.blocking_send(choice).is_ok(),
            Ok(None) => true,
            Err(e) => {
                report(sink, &e);
                true
            }
        };

        if !sent {
            report(sink, &Error::ChannelClosed);
            break;
        }
    }
}

fn report<W: Write>(sink: &EventSink<W>, error: &Error) {
    warn!("{}", error);
    sink.emit(&HeadlessEvent::error(error.to_string(), error.is_fatal()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(sink: EventSink<Vec<u8>>) -> Vec<serde_json::Value> {
        String::from_utf8(sink.into_inner().unwrap())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn message(line: &str) -> Message {
        match parse_input(line).unwrap() {
            Some(HeadlessInput::Message(message)) => message,
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_panel_requests() {
        assert_eq!(message(r#"{"type":"refresh"}"#), PanelRequest::Refresh.into());
        assert_eq!(
            message(r#"{"type":"selectScheme"}"#),
            PanelRequest::SelectScheme.into()
        );
        assert_eq!(message(r#"{"type":"runApp"}"#), PanelRequest::RunApp.into());
        assert_eq!(
            message(r#" {"type":"cleanBuild"} "#),
            PanelRequest::CleanBuild.into()
        );
    }

    #[test]
    fn test_parse_palette_and_control() {
        assert_eq!(
            message(r#"{"type":"focusPanel"}"#),
            PaletteCommand::FocusPanel.into()
        );
        assert_eq!(
            message(r#"{"type":"visibility","visible":false}"#),
            Message::VisibilityChanged(false)
        );
        assert_eq!(message(r#"{"type":"quit"}"#), Message::Quit);
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(
            parse_input(r#"{"type":"choice","index":2}"#).unwrap(),
            Some(HeadlessInput::Choice(Some(2)))
        );
        assert_eq!(
            parse_input(r#"{"type":"choice","index":null}"#).unwrap(),
            Some(HeadlessInput::Choice(None))
        );
        assert_eq!(
            parse_input("0").unwrap(),
            Some(HeadlessInput::Choice(Some(0)))
        );
        assert_eq!(
            parse_input("cancel").unwrap(),
            Some(HeadlessInput::Choice(None))
        );
    }

    #[test]
    fn test_parse_short_words() {
        assert_eq!(message("r"), PanelRequest::Refresh.into());
        assert_eq!(message("device"), PanelRequest::SelectDevice.into());
        assert_eq!(message("build"), PanelRequest::BuildApp.into());
        assert_eq!(message("q"), Message::Quit);
    }

    #[test]
    fn test_parse_blank_and_invalid() {
        assert_eq!(parse_input("   ").unwrap(), None);
        assert!(matches!(
            parse_input("explode"),
            Err(Error::Protocol { .. })
        ));
        assert!(matches!(
            parse_input(r#"{"type":"launchRockets"}"#),
            Err(Error::Protocol { .. })
        ));
    }

    #[test]
    fn test_read_requests_routes_lines_and_reports_bad_ones() {
        let (msg_tx, mut msg_rx) = mpsc::channel(8);
        let (choice_tx, mut choice_rx) = mpsc::channel(8);
        let sink = EventSink::new(Vec::new());
        let input = "r\nexplode\n\n1\nq\nbuild\n";

        read_requests(input.as_bytes(), &msg_tx, &choice_tx, &sink);

        assert_eq!(msg_rx.try_recv().unwrap(), PanelRequest::Refresh.into());
        assert_eq!(msg_rx.try_recv().unwrap(), Message::Quit);
        // Nothing after quit
        assert!(msg_rx.try_recv().is_err());
        assert_eq!(choice_rx.try_recv().unwrap(), Some(1));

        let events = events(sink);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event"], "error");
        assert_eq!(events[0]["fatal"], false);
    }

    #[test]
    fn test_read_requests_stops_when_engine_is_gone() {
        let (msg_tx, msg_rx) = mpsc::channel(8);
        let (choice_tx, _choice_rx) = mpsc::channel(8);
        drop(msg_rx);
        let sink = EventSink::new(Vec::new());

        read_requests("r\ns\n".as_bytes(), &msg_tx, &choice_tx, &sink);

        let events = events(sink);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["message"], "Channel closed unexpectedly");
        assert_eq!(events[0]["fatal"], true);
    }
}
