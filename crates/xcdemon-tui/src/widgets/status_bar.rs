//! Status bar widget
//!
//! Shows the last host message, or missing-tool warnings when there is none.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::{palette, styles};
use crate::view::PanelView;

pub struct StatusBar<'a> {
    view: &'a PanelView,
}

impl<'a> StatusBar<'a> {
    pub fn new(view: &'a PanelView) -> Self {
        Self { view }
    }

    /// Build all segments with separators
    fn build_segments(&self) -> Vec<Span<'static>> {
        let separator = Span::styled(" │ ", styles::text_muted());
        let mut segments = vec![Span::raw(" ")];

        if let Some((level, message)) = &self.view.status {
            segments.push(Span::styled(message.clone(), styles::message_style(*level)));
        }

        for warning in &self.view.tool_warnings {
            if segments.len() > 1 {
                segments.push(separator.clone());
            }
            segments.push(Span::styled(
                format!("⚠ {}", warning),
                Style::default()
                    .fg(palette::STATUS_YELLOW)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        if segments.len() == 1 {
            segments.push(Span::styled("Idle", styles::text_muted()));
        }

        segments
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Top border looks like a separator
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(styles::border_inactive());

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Line::from(self.build_segments())).render(inner, buf);
    }
}
