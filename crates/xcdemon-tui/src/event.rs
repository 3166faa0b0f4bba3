//! Terminal event polling

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use xcdemon_app::{Message, PanelRequest};
use xcdemon_core::prelude::*;

/// Map a key press to an engine message
///
/// Panel actions only fire while the panel is visible; `h` toggles it.
pub fn key_to_message(key: KeyEvent, panel_visible: bool) -> Option<Message> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Message::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Message::Quit),
        KeyCode::Char('h') => Some(Message::VisibilityChanged(!panel_visible)),
        _ if !panel_visible => None,
        KeyCode::Char('r') => Some(PanelRequest::Refresh.into()),
        KeyCode::Char('s') => Some(PanelRequest::SelectScheme.into()),
        KeyCode::Char('d') => Some(PanelRequest::SelectDevice.into()),
        KeyCode::Enter => Some(PanelRequest::RunApp.into()),
        KeyCode::Char('b') => Some(PanelRequest::BuildApp.into()),
        KeyCode::Char('c') => Some(PanelRequest::CleanBuild.into()),
        _ => None,
    }
}

/// Poll for terminal events with timeout
pub fn poll(panel_visible: bool) -> Result<Option<Message>> {
    // Poll with 50ms timeout (20 FPS)
    if !event::poll(Duration::from_millis(50))? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Ok(key_to_message(key, panel_visible))
        }
        _ => Ok(None),
    }
}
