//! Terminal host
//!
//! Implements the host capabilities on top of the ratatui terminal. Commands
//! meant for "the terminal" run in the real one: the TUI steps aside while
//! they stream their output, then comes back once the user presses Enter.

use std::cell::{Cell, RefCell};

use ratatui::DefaultTerminal;
use tokio::process::Command;

use xcdemon_app::{LocalHost, MessageLevel, PanelMessage, ToolCommand};
use xcdemon_core::prelude::*;
use xcdemon_toolchain::spawn_error;

use crate::render;
use crate::selector;
use crate::terminal;
use crate::view::PanelView;

pub struct TuiHost {
    terminal: RefCell<DefaultTerminal>,
    view: RefCell<PanelView>,
    panel_visible: Cell<bool>,

    /// The TUI has handed the screen to a terminal command
    suspended: Cell<bool>,
}

impl TuiHost {
    pub fn new(terminal: DefaultTerminal) -> Self {
        Self {
            terminal: RefCell::new(terminal),
            view: RefCell::new(PanelView::new()),
            panel_visible: Cell::new(true),
            suspended: Cell::new(false),
        }
    }

    pub fn set_tool_warnings(&self, warnings: Vec<String>) {
        self.view.borrow_mut().tool_warnings = warnings;
    }

    pub fn set_panel_visible(&self, visible: bool) {
        self.panel_visible.set(visible);
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.get()
    }

    /// Draw the current view; a no-op while suspended
    pub fn draw(&self) -> Result<()> {
        if self.suspended.get() {
            return Ok(());
        }

        let view = self.view.borrow();
        let visible = self.panel_visible.get();
        self.terminal
            .borrow_mut()
            .draw(|frame| render::view(frame, &view, visible))?;
        Ok(())
    }

    /// Hand the screen back to the shell
    fn suspend(&self) {
        if !self.suspended.replace(true) {
            ratatui::restore();
        }
    }

    /// Wait for Enter, then take the screen back
    pub fn resume_if_suspended(&self) -> Result<()> {
        if !self.suspended.get() {
            return Ok(());
        }

        terminal::wait_for_enter("Press Enter to return to Xcode Demon...")?;
        *self.terminal.borrow_mut() = terminal::init()?;
        self.suspended.set(false);
        Ok(())
    }
}

impl LocalHost for TuiHost {
    fn show_message(&self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Info => info!("{}", message),
            MessageLevel::Error => warn!("{}", message),
        }
        if self.suspended.get() {
            println!("{}", message);
        }
        self.view.borrow_mut().set_status(level, message);
    }

    async fn pick(&self, placeholder: &str, items: &[String]) -> Option<String> {
        if let Err(e) = self.resume_if_suspended() {
            error!("Failed to restore terminal: {}", e);
            return None;
        }

        let view = self.view.borrow();
        let mut terminal = self.terminal.borrow_mut();
        match selector::select_item(
            &mut *terminal,
            placeholder,
            items,
            &*view,
            self.panel_visible.get(),
        ) {
            Ok(choice) => choice,
            Err(e) => {
                error!("Selector failed: {}", e);
                None
            }
        }
    }

    fn post(&self, message: &PanelMessage) {
        self.view.borrow_mut().apply(message);
    }

    async fn run_in_terminal(&self, terminal: &str, command: &ToolCommand) -> Result<Option<i32>> {
        self.suspend();

        println!("\n[{}] $ {}", terminal, command);
        info!("[{}] {}", terminal, command);

        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .await
            .map_err(|e| spawn_error(&command.program, e))?;

        match status.code() {
            Some(code) => println!("[{}] exited with code {}", terminal, code),
            None => println!("[{}] terminated by signal", terminal),
        }
        Ok(status.code())
    }
}
