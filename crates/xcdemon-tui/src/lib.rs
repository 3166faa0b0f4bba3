//! xcdemon-tui - Terminal UI for Xcode Demon
//!
//! This crate provides the ratatui-based terminal interface. It creates an Engine
//! from xcdemon-app with a terminal host and adds rendering, key handling, and
//! the selector modal.

pub mod event;
pub mod host;
pub mod layout;
pub mod render;
pub mod runner;
pub mod selector;
pub mod terminal;
pub mod theme;
pub mod view;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use host::TuiHost;
pub use runner::run;
pub use selector::select_item;
pub use view::PanelView;
