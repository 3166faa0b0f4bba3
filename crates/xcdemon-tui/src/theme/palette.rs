//! Color palette for the panel.

use ratatui::style::Color;

// --- Background layers ---
pub const CARD_BG: Color = Color::Black; // Panel backgrounds
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43); // Modal backgrounds

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray; // Inactive borders
pub const BORDER_ACTIVE: Color = Color::Cyan; // Focused borders

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const CONTRAST_FG: Color = Color::Black; // Text on accent backgrounds

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green; // Ready / success
pub const STATUS_RED: Color = Color::Red; // Error
pub const STATUS_YELLOW: Color = Color::Yellow; // Warning / partial
pub const STATUS_BLUE: Color = Color::Blue; // Info
