//! Application state (the State Store)
//!
//! Plain fields, mutated only by the controller from within one event at a
//! time. Never shared across threads.

use std::path::{Path, PathBuf};

use xcdemon_core::{Project, SelectionState};
use xcdemon_toolchain::ToolAvailability;

use crate::config::Settings;
use crate::message::PanelMessage;

/// How far the user has got towards being able to run
///
/// Derived from state, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Readiness {
    NoProject,
    HasProject,
    HasScheme,
    HasSchemeAndDevice,
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Workspace folders; only the first is ever searched
    pub workspace_roots: Vec<PathBuf>,

    /// Last discovered project, replaced wholesale on refresh
    pub project: Option<Project>,

    /// User selections; survive refreshes unvalidated
    pub selection: SelectionState,

    /// Whether the panel is currently shown
    pub panel_visible: bool,

    /// External tools found at startup
    pub tools: ToolAvailability,

    pub settings: Settings,
}

impl AppState {
    pub fn new(workspace_roots: Vec<PathBuf>) -> Self {
        Self::with_settings(workspace_roots, Settings::default())
    }

    pub fn with_settings(workspace_roots: Vec<PathBuf>, settings: Settings) -> Self {
        Self {
            workspace_roots,
            project: None,
            selection: SelectionState::default(),
            panel_visible: true,
            tools: ToolAvailability::default(),
            settings,
        }
    }

    pub fn first_root(&self) -> Option<&Path> {
        self.workspace_roots.first().map(PathBuf::as_path)
    }

    pub fn readiness(&self) -> Readiness {
        match (
            &self.project,
            self.selection.scheme(),
            &self.selection.selected_device,
        ) {
            (None, _, _) => Readiness::NoProject,
            (Some(_), None, _) => Readiness::HasProject,
            (Some(_), Some(_), None) => Readiness::HasScheme,
            (Some(_), Some(_), Some(_)) => Readiness::HasSchemeAndDevice,
        }
    }

    /// The message the panel should currently show
    pub fn snapshot(&self) -> PanelMessage {
        PanelMessage::snapshot(self.project.as_ref(), &self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcdemon_core::{DescriptorKind, Device};

    fn project() -> Project {
        Project {
            path: PathBuf::from("/w/Foo.xcodeproj"),
            name: "Foo".to_string(),
            kind: DescriptorKind::Project,
            schemes: vec![],
            devices: vec![],
        }
    }

    #[test]
    fn test_readiness_ladder() {
        let mut state = AppState::new(vec![PathBuf::from("/w")]);
        assert_eq!(state.readiness(), Readiness::NoProject);

        state.project = Some(project());
        assert_eq!(state.readiness(), Readiness::HasProject);

        state.selection.selected_scheme = "Foo".to_string();
        assert_eq!(state.readiness(), Readiness::HasScheme);

        state.selection.selected_device = Some(Device::simulator("A", "iPhone", "iOS-17-0"));
        assert_eq!(state.readiness(), Readiness::HasSchemeAndDevice);
    }

    #[test]
    fn test_device_without_scheme_is_not_ready() {
        let mut state = AppState::new(vec![]);
        state.project = Some(project());
        state.selection.selected_device = Some(Device::simulator("A", "iPhone", "iOS-17-0"));

        assert_eq!(state.readiness(), Readiness::HasProject);
    }

    #[test]
    fn test_first_root() {
        let state = AppState::new(vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(state.first_root(), Some(Path::new("/a")));
        assert_eq!(AppState::new(vec![]).first_root(), None);
    }

    #[test]
    fn test_snapshot_without_project() {
        let state = AppState::new(vec![]);
        assert!(state.snapshot().project_info().is_none());
    }
}
