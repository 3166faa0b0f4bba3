//! Interactive single-choice selector
//!
//! A modal list drawn over the panel. Used for scheme and device choice;
//! the caller gets the chosen item back, or `None` when the user cancels.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};

use xcdemon_core::prelude::*;

use crate::render;
use crate::theme::styles;
use crate::view::PanelView;

/// Items reachable with a single digit key
const MAX_QUICK_SELECT: usize = 9;

/// State for the selector UI
struct SelectorState {
    /// Index of currently highlighted item
    selected: usize,
    /// List widget state
    list_state: ListState,
}

impl SelectorState {
    fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected: 0,
            list_state,
        }
    }

    fn select_next(&mut self, max: usize) {
        if self.selected < max.saturating_sub(1) {
            self.selected += 1;
            self.list_state.select(Some(self.selected));
        }
    }

    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.list_state.select(Some(self.selected));
        }
    }

    fn select_index(&mut self, index: usize, max: usize) {
        if index < max {
            self.selected = index;
            self.list_state.select(Some(self.selected));
        }
    }
}

/// What a key press does to an open selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    /// Keep the selector open
    Continue,
    /// Return the item at this index
    Confirm(usize),
    /// Close without a choice
    Cancel,
}

fn handle_key(
    state: &mut SelectorState,
    code: KeyCode,
    modifiers: KeyModifiers,
    count: usize,
) -> KeyOutcome {
    if is_cancel_key(code, modifiers) {
        return KeyOutcome::Cancel;
    }

    match code {
        KeyCode::Up | KeyCode::Char('k') => state.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => state.select_next(count),
        KeyCode::Enter => return KeyOutcome::Confirm(state.selected),
        KeyCode::Char(c) => {
            if let Some(index) = validate_selection(c, count) {
                state.select_index(index, count);
                return KeyOutcome::Confirm(index);
            }
        }
        _ => {}
    }
    KeyOutcome::Continue
}

/// Display a selector over the panel and wait for user input
///
/// Returns `Ok(None)` when `items` is empty or the user cancels.
pub fn select_item<B: Backend>(
    terminal: &mut Terminal<B>,
    placeholder: &str,
    items: &[String],
    background: &PanelView,
    panel_visible: bool,
) -> Result<Option<String>> {
    if items.is_empty() {
        return Ok(None);
    }

    let mut state = SelectorState::new();

    let result = loop {
        terminal
            .draw(|frame| {
                render::view(frame, background, panel_visible);
                render_selector(frame, placeholder, items, &mut state);
            })
            .map_err(|e| Error::terminal(e.to_string()))?;

        if event::poll(std::time::Duration::from_millis(100))
            .map_err(|e| Error::terminal(e.to_string()))?
        {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read().map_err(|e| Error::terminal(e.to_string()))?
            {
                match handle_key(&mut state, code, modifiers, items.len()) {
                    KeyOutcome::Continue => {}
                    KeyOutcome::Confirm(index) => break items.get(index).cloned(),
                    KeyOutcome::Cancel => break None,
                }
            }
        }
    };

    Ok(result)
}

/// Render the selector modal
fn render_selector(
    frame: &mut Frame,
    placeholder: &str,
    items: &[String],
    state: &mut SelectorState,
) {
    let area = frame.area();
    let (modal_width, modal_height) = modal_size(area, items.len());
    let modal_area = center_rect(modal_width, modal_height, area);

    frame.render_widget(Clear, modal_area);

    let title = format!(" {} ", placeholder);
    let outer_block = styles::modal_block(&title);
    let inner_area = outer_block.inner(modal_area);
    frame.render_widget(outer_block, modal_area);

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Item list
        Constraint::Length(2), // Footer/help
    ])
    .split(inner_area);

    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let hint = if i < MAX_QUICK_SELECT {
                format!("[{}] ", i + 1)
            } else {
                "    ".to_string()
            };
            ListItem::new(Line::from(vec![
                Span::styled(hint, styles::keybinding()),
                Span::styled(item.clone(), styles::text_primary()),
            ]))
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(styles::border_inactive()),
        )
        .highlight_style(styles::focused_selected())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], &mut state.list_state);

    let footer_text = Line::from(vec![
        Span::styled("↑/↓", styles::keybinding()),
        Span::raw(" Navigate  "),
        Span::styled("Enter", styles::keybinding()),
        Span::raw(" Select  "),
        Span::styled("1-9", styles::keybinding()),
        Span::raw(" Quick select  "),
        Span::styled("Esc", styles::keybinding()),
        Span::raw(" Cancel"),
    ]);
    let footer = Paragraph::new(footer_text).alignment(Alignment::Center);
    frame.render_widget(footer, chunks[1]);
}

/// Center a rectangle within another rectangle
/// Modal size for `item_count` rows, never larger than `area`
fn modal_size(area: Rect, item_count: usize) -> (u16, u16) {
    let width = u16::try_from(u32::from(area.width) * 70 / 100)
        .unwrap_or(u16::MAX)
        .clamp(40, 70)
        .min(area.width);

    // items + borders + footer
    let content_height = u16::try_from(item_count)
        .unwrap_or(u16::MAX)
        .saturating_add(6);
    let height = content_height.min(area.height.saturating_sub(2));

    (width, height)
}

fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Validate and convert a digit key press to an item index
pub fn validate_selection(key: char, count: usize) -> Option<usize> {
    // Only accept digits 1-9
    if !key.is_ascii_digit() || key == '0' {
        return None;
    }

    let index = (key as usize) - ('1' as usize);
    let max_index = count.min(MAX_QUICK_SELECT);

    if index < max_index {
        Some(index)
    } else {
        None
    }
}

/// Check if a key press is a cancellation request
pub fn is_cancel_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Esc => true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => true,
        _ => false,
    }
}
