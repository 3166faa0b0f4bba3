//! Terminal setup and restoration

use std::io::Write;

use ratatui::DefaultTerminal;
use xcdemon_core::prelude::*;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Enter raw mode and the alternate screen
pub fn init() -> Result<DefaultTerminal> {
    ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))
}

/// Block on the restored shell until the user presses Enter
pub fn wait_for_enter(prompt: &str) -> Result<()> {
    print!("\n{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Waiting for Enter")?;
    Ok(())
}
