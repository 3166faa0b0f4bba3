//! Header bar widget
//!
//! Shows the app title, the project name and the readiness indicator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use xcdemon_app::Readiness;

use crate::theme::{palette, styles};

pub struct PanelHeader<'a> {
    project_name: Option<&'a str>,
    readiness: Readiness,
}

impl<'a> PanelHeader<'a> {
    pub fn new(project_name: Option<&'a str>, readiness: Readiness) -> Self {
        Self {
            project_name,
            readiness,
        }
    }
}

impl Widget for PanelHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (icon, label, style) = styles::readiness_indicator(self.readiness);

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(icon, style),
            Span::raw(" "),
            Span::styled("Xcode Demon", styles::accent_bold()),
        ];

        if let Some(name) = self.project_name {
            spans.push(Span::styled(" · ", styles::text_muted()));
            spans.push(Span::styled(name.to_string(), styles::text_primary()));
        }

        spans.push(Span::styled(" · ", styles::text_muted()));
        spans.push(Span::styled(label, style));

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(header: PanelHeader<'_>) -> String {
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| frame.render_widget(header, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_project_and_readiness() {
        let content = render(PanelHeader::new(Some("Foo"), Readiness::HasScheme));
        assert!(content.contains("Xcode Demon"));
        assert!(content.contains("Foo"));
        assert!(content.contains("Pick a device"));
    }

    #[test]
    fn test_header_without_project() {
        let content = render(PanelHeader::new(None, Readiness::NoProject));
        assert!(content.contains("No project"));
    }
}
