//! Project panel widget
//!
//! Renders the selected scheme and device plus the full scheme and device
//! lists from the latest snapshot.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

use xcdemon_app::ProjectInfo;
use xcdemon_core::Device;

use crate::theme::{palette, styles};

/// Placeholder shown while nothing is selected
const NOT_SELECTED: &str = "not selected";

pub struct ProjectPanel<'a> {
    info: Option<&'a ProjectInfo>,
    loaded: bool,
}

impl<'a> ProjectPanel<'a> {
    pub fn new(info: Option<&'a ProjectInfo>, loaded: bool) -> Self {
        Self { info, loaded }
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let text = if self.loaded {
            "No Xcode project found in this workspace. Press r to refresh."
        } else {
            "Looking for an Xcode project..."
        };
        Paragraph::new(Line::from(Span::styled(text, styles::text_muted()))).render(area, buf);
    }

    fn render_selection(info: &ProjectInfo, area: Rect, buf: &mut Buffer) {
        let scheme = if info.selected_scheme.is_empty() {
            Span::styled(NOT_SELECTED, styles::text_muted())
        } else {
            Span::styled(info.selected_scheme.clone(), styles::accent_bold())
        };
        let device = match &info.selected_device {
            Some(device) => Span::styled(device.label(), styles::accent_bold()),
            None => Span::styled(NOT_SELECTED, styles::text_muted()),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(" Scheme: ", styles::text_secondary()),
                scheme,
            ]),
            Line::from(vec![
                Span::styled(" Device: ", styles::text_secondary()),
                device,
            ]),
        ];
        Paragraph::new(lines).render(area, buf);
    }

    fn list_block(title: &str) -> Block<'_> {
        Block::default()
            .borders(Borders::TOP)
            .border_style(styles::border_inactive())
            .title(Span::styled(title, styles::text_secondary()))
    }

    fn scheme_items(info: &ProjectInfo) -> Vec<ListItem<'static>> {
        info.schemes
            .iter()
            .map(|scheme| {
                let selected = *scheme == info.selected_scheme;
                ListItem::new(Line::from(vec![
                    Span::styled(if selected { "● " } else { "  " }, styles::accent()),
                    Span::styled(scheme.clone(), item_style(selected)),
                ]))
            })
            .collect()
    }

    fn device_items(info: &ProjectInfo) -> Vec<ListItem<'static>> {
        info.devices
            .iter()
            .map(|device| {
                let selected = is_selected_device(info.selected_device.as_ref(), device);
                ListItem::new(Line::from(vec![
                    Span::styled(if selected { "● " } else { "  " }, styles::accent()),
                    Span::styled(device.name.clone(), item_style(selected)),
                    Span::styled(format!(" ({})", device.os_label), styles::text_muted()),
                ]))
            })
            .collect()
    }
}

fn item_style(selected: bool) -> Style {
    if selected {
        styles::accent_bold()
    } else {
        styles::text_primary()
    }
}

fn is_selected_device(selected: Option<&Device>, device: &Device) -> bool {
    selected.is_some_and(|s| s.id == device.id)
}

impl Widget for ProjectPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let Some(info) = self.info else {
            self.render_empty(inner, buf);
            return;
        };

        let [selection, lists] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(inner);
        Self::render_selection(info, selection, buf);

        let [schemes, devices] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(lists);

        List::new(Self::scheme_items(info))
            .block(Self::list_block(" Schemes "))
            .render(schemes, buf);

        let device_list = if info.devices.is_empty() {
            List::new(vec![ListItem::new(Span::styled(
                "  No iOS simulators",
                styles::text_muted(),
            ))])
        } else {
            List::new(Self::device_items(info))
        };
        device_list
            .block(Self::list_block(" Devices "))
            .render(devices, buf);
    }
}

/// One-line keybinding hints below the panel
pub struct KeyHints {
    panel_visible: bool,
}

impl KeyHints {
    pub fn new(panel_visible: bool) -> Self {
        Self { panel_visible }
    }
}

impl Widget for KeyHints {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bindings: &[(&str, &str)] = if self.panel_visible {
            &[
                ("r", "Refresh"),
                ("s", "Scheme"),
                ("d", "Device"),
                ("Enter", "Run"),
                ("b", "Build"),
                ("c", "Clean"),
                ("h", "Hide"),
                ("q", "Quit"),
            ]
        } else {
            &[("h", "Show panel"), ("q", "Quit")]
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, label) in bindings {
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", label), styles::text_secondary()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
