//! Custom widget components

mod header;
mod panel;
mod status_bar;

pub use header::PanelHeader;
pub use panel::{KeyHints, ProjectPanel};
pub use status_bar::StatusBar;
