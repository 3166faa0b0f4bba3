//! TUI runner - entry point for interactive mode

use std::path::PathBuf;

use xcdemon_app::Engine;
use xcdemon_core::prelude::*;
use xcdemon_toolchain::SystemRunner;

use crate::event;
use crate::host::TuiHost;
use crate::terminal;

/// Run the TUI over the given workspace roots
///
/// The first root is searched for a project; the rest are kept for display.
pub async fn run(workspace_roots: Vec<PathBuf>) -> Result<()> {
    terminal::install_panic_hook();

    let mut engine = Engine::new(workspace_roots, TuiHost::new(terminal::init()?)).await;

    let warnings = engine
        .state()
        .tools
        .unavailable_messages()
        .into_iter()
        .map(String::from)
        .collect();
    engine.host().set_tool_warnings(warnings);
    engine.host().draw()?;

    engine.start().await;

    let result = run_loop(&mut engine).await;
    if let Err(e) = &result {
        error!("TUI loop failed: {}", e);
    }

    if !engine.host().is_suspended() {
        ratatui::restore();
    }
    result
}

/// Draw, poll, process until quit
async fn run_loop(engine: &mut Engine<SystemRunner, TuiHost>) -> Result<()> {
    loop {
        engine.host().resume_if_suspended()?;

        let visible = engine.state().panel_visible;
        engine.host().set_panel_visible(visible);
        engine.host().draw()?;

        if let Some(message) = event::poll(visible)? {
            if !engine.process_message(message).await {
                return Ok(());
            }
        }

        // Messages queued by other senders
        while let Some(message) = engine.try_next_message() {
            if !engine.process_message(message).await {
                return Ok(());
            }
        }
    }
}
