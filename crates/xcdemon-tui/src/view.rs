//! Panel view state
//!
//! What the TUI knows about the world comes only from what the controller
//! posts across the panel boundary, plus the last host message.

use xcdemon_app::{MessageLevel, PanelMessage, ProjectInfo, Readiness};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelView {
    /// Latest snapshot; `None` until the first post or when no project exists
    pub content: Option<ProjectInfo>,

    /// Whether any snapshot has arrived yet
    pub loaded: bool,

    /// Last message shown by the controller
    pub status: Option<(MessageLevel, String)>,

    /// Missing-tool warnings from startup
    pub tool_warnings: Vec<String>,
}

impl PanelView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content with a posted snapshot
    pub fn apply(&mut self, message: &PanelMessage) {
        self.content = message.project_info().cloned();
        self.loaded = true;
    }

    pub fn set_status(&mut self, level: MessageLevel, message: impl Into<String>) {
        self.status = Some((level, message.into()));
    }

    pub fn readiness(&self) -> Readiness {
        match &self.content {
            None => Readiness::NoProject,
            Some(info) if info.selected_scheme.is_empty() => Readiness::HasProject,
            Some(info) if info.selected_device.is_none() => Readiness::HasScheme,
            Some(_) => Readiness::HasSchemeAndDevice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcdemon_core::Device;

    fn info(scheme: &str, device: Option<Device>) -> ProjectInfo {
        ProjectInfo {
            name: "Foo".to_string(),
            selected_scheme: scheme.to_string(),
            selected_device: device,
            schemes: vec!["Foo".to_string()],
            devices: vec![],
        }
    }

    #[test]
    fn test_apply_replaces_content() {
        let mut view = PanelView::new();
        assert!(!view.loaded);

        view.apply(&PanelMessage::UpdateContent {
            project_info: Some(info("", None)),
        });
        assert!(view.loaded);
        assert_eq!(view.content.as_ref().map(|i| i.name.as_str()), Some("Foo"));

        view.apply(&PanelMessage::UpdateContent { project_info: None });
        assert!(view.content.is_none());
        assert!(view.loaded);
    }

    #[test]
    fn test_readiness_from_snapshot() {
        let mut view = PanelView::new();
        assert_eq!(view.readiness(), Readiness::NoProject);

        view.content = Some(info("", None));
        assert_eq!(view.readiness(), Readiness::HasProject);

        view.content = Some(info("Foo", None));
        assert_eq!(view.readiness(), Readiness::HasScheme);

        view.content = Some(info(
            "Foo",
            Some(Device::simulator("A", "iPhone 15", "iOS-17-0")),
        ));
        assert_eq!(view.readiness(), Readiness::HasSchemeAndDevice);
    }
}
