//! Main render/view function


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;
use crate::view::PanelView;

/// Render the complete UI
///
/// Pure rendering: reads the view, never modifies it.
pub fn view(frame: &mut Frame, view: &PanelView, panel_visible: bool) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::CARD_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area, panel_visible);

    let project_name = view.content.as_ref().map(|info| info.name.as_str());
    frame.render_widget(
        widgets::PanelHeader::new(project_name, view.readiness()),
        areas.header,
    );

    if panel_visible {
        frame.render_widget(
            widgets::ProjectPanel::new(view.content.as_ref(), view.loaded),
            areas.body,
        );
    }

    frame.render_widget(widgets::KeyHints::new(panel_visible), areas.keys);
    frame.render_widget(widgets::StatusBar::new(view), areas.status);
}
