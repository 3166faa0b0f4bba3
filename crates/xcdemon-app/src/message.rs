//! Message types for the application
//!
//! Three kinds of traffic cross the panel boundary:
//! - [`PanelRequest`] - user intents sent from the panel to the controller
//! - [`PanelMessage`] - state snapshots pushed from the controller to the panel
//! - [`PaletteCommand`] - command-palette entry points with no state of their own
//!
//! [`Message`] wraps them (plus visibility and quit) for the engine channel.

use serde::{Deserialize, Serialize};

use xcdemon_core::{Device, Project, SelectionState};

/// A user intent sent by the panel
///
/// Wire shape: `{"type": "refresh" | "selectScheme" | ...}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PanelRequest {
    Refresh,
    SelectScheme,
    SelectDevice,
    RunApp,
    BuildApp,
    CleanBuild,
}

/// Command-palette entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PaletteCommand {
    /// Make the panel visible
    FocusPanel,
    /// Same as [`PanelRequest::Refresh`]
    RefreshPanel,
}

/// Project state as the panel renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub name: String,
    pub selected_scheme: String,
    pub selected_device: Option<Device>,
    pub schemes: Vec<String>,
    pub devices: Vec<Device>,
}

impl ProjectInfo {
    pub fn new(project: &Project, selection: &SelectionState) -> Self {
        Self {
            name: project.name.clone(),
            selected_scheme: selection.selected_scheme.clone(),
            selected_device: selection.selected_device.clone(),
            schemes: project.schemes.clone(),
            devices: project.devices.clone(),
        }
    }
}

/// A message pushed to the panel
///
/// Wire shape: `{"type": "updateContent", "projectInfo": null | {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PanelMessage {
    UpdateContent {
        #[serde(rename = "projectInfo")]
        project_info: Option<ProjectInfo>,
    },
}

impl PanelMessage {
    /// Snapshot of the current project and selection
    pub fn snapshot(project: Option<&Project>, selection: &SelectionState) -> Self {
        PanelMessage::UpdateContent {
            project_info: project.map(|p| ProjectInfo::new(p, selection)),
        }
    }

    pub fn project_info(&self) -> Option<&ProjectInfo> {
        match self {
            PanelMessage::UpdateContent { project_info } => project_info.as_ref(),
        }
    }
}

/// Everything the engine loop processes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Intent from the panel
    Panel(PanelRequest),

    /// Command-palette entry point
    Palette(PaletteCommand),

    /// The panel was shown or hidden by the host
    VisibilityChanged(bool),

    /// Stop the engine loop
    Quit,
}

impl From<PanelRequest> for Message {
    fn from(request: PanelRequest) -> Self {
        Message::Panel(request)
    }
}

impl From<PaletteCommand> for Message {
    fn from(command: PaletteCommand) -> Self {
        Message::Palette(command)
    }
}
