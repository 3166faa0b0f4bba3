//! Engine - shared orchestration for the TUI and headless runners
//!
//! Owns the controller and the message channel. Messages are processed one
//! at a time, each to completion, so state is never mutated concurrently.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use xcdemon_toolchain::{LocalProcessRunner, SystemRunner, ToolAvailability};

use crate::config::{self, Settings};
use crate::controller::Controller;
use crate::host::LocalHost;
use crate::message::Message;
use crate::state::AppState;

/// Capacity of the message channel
const CHANNEL_CAPACITY: usize = 256;

pub struct Engine<R, H> {
    controller: Controller<R, H>,

    /// Sender half of the message channel.
    /// Clone this to give to input sources (stdin reader, signal handler).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the message channel.
    msg_rx: mpsc::Receiver<Message>,
}

impl<H: LocalHost> Engine<SystemRunner, H> {
    /// Create an Engine for a set of workspace roots
    ///
    /// Performs the shared initialization:
    /// - Loads settings from the first root's `.xcdemon/config.toml`
    /// - Probes for `xcodebuild` and `xcrun simctl`
    /// - Creates a process runner, bounded by the discovery timeout if one is set
    pub async fn new(workspace_roots: Vec<PathBuf>, host: H) -> Self {
        let settings = workspace_roots
            .first()
            .map(|root| config::load_settings(root))
            .unwrap_or_default();

        let runner = match settings.discovery.timeout() {
            Some(timeout) => SystemRunner::with_timeout(timeout),
            None => SystemRunner::new(),
        };

        let mut state = AppState::with_settings(workspace_roots, settings);
        state.tools = ToolAvailability::check().await;

        Self::with_controller(Controller::new(state, runner, host))
    }
}

impl<R, H> Engine<R, H>
where
    R: LocalProcessRunner,
    H: LocalHost,
{
    pub fn with_controller(controller: Controller<R, H>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            controller,
            msg_tx,
            msg_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        self.controller.state()
    }

    pub fn settings(&self) -> &Settings {
        &self.controller.state().settings
    }

    pub fn host(&self) -> &H {
        self.controller.host()
    }

    pub fn controller_mut(&mut self) -> &mut Controller<R, H> {
        &mut self.controller
    }

    /// Initial refresh once the workspace is resolved
    pub async fn start(&mut self) {
        info!(
            "Starting with workspace roots {:?}",
            self.controller.state().workspace_roots
        );
        for message in self.controller.state().tools.unavailable_messages() {
            warn!("{}", message);
        }
        self.controller.refresh().await;
    }

    /// Process one message to completion
    ///
    /// Returns `false` when the engine should stop.
    pub async fn process_message(&mut self, message: Message) -> bool {
        debug!("Processing {:?}", message);
        match message {
            Message::Panel(request) => self.controller.handle(request).await,
            Message::Palette(command) => self.controller.handle_palette(command).await,
            Message::VisibilityChanged(visible) => {
                self.controller.set_panel_visible(visible).await
            }
            Message::Quit => return false,
        }
        true
    }

    /// Take the next queued message without waiting
    pub fn try_next_message(&mut self) -> Option<Message> {
        self.msg_rx.try_recv().ok()
    }

    /// Start, then process messages until `Quit` or every sender is gone
    pub async fn run(&mut self) {
        self.start().await;

        while let Some(message) = self.msg_rx.recv().await {
            if !self.process_message(message).await {
                break;
            }
        }

        info!("Engine stopped");
    }
}
