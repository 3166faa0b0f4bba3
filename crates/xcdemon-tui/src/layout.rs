//! Screen layout definitions for the TUI
//!
//! The panel body collapses to nothing while the panel is hidden.

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Header area (title + project name + readiness)
    pub header: Rect,

    /// Panel body (selection + lists); zero height when hidden
    pub body: Rect,

    /// Keybinding hints
    pub keys: Rect,

    /// Status bar (top border + one message row)
    pub status: Rect,
}

pub fn create(area: Rect, panel_visible: bool) -> ScreenAreas {
    let body = if panel_visible {
        Constraint::Min(6)
    } else {
        Constraint::Length(0)
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Header (glass container)
        body,
        Constraint::Length(1), // Keybindings
        Constraint::Length(2), // Status bar
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        keys: chunks[2],
        status: chunks[3],
    }
}
