//! Semantic style builders for the panel.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use xcdemon_app::{MessageLevel, Readiness};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - used for the highlighted row in lists
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

/// Style for a host message
pub fn message_style(level: MessageLevel) -> Style {
    match level {
        MessageLevel::Info => Style::default().fg(palette::STATUS_BLUE),
        MessageLevel::Error => Style::default()
            .fg(palette::STATUS_RED)
            .add_modifier(Modifier::BOLD),
    }
}

/// Readiness indicator for the panel header.
///
/// Returns `(icon_char, label, Style)`.
pub fn readiness_indicator(readiness: Readiness) -> (&'static str, &'static str, Style) {
    match readiness {
        Readiness::NoProject => ("○", "No project", text_muted()),
        Readiness::HasProject => (
            "◐",
            "Pick a scheme",
            Style::default().fg(palette::STATUS_YELLOW),
        ),
        Readiness::HasScheme => (
            "◑",
            "Pick a device",
            Style::default().fg(palette::STATUS_YELLOW),
        ),
        Readiness::HasSchemeAndDevice => (
            "●",
            "Ready",
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
    }
}
