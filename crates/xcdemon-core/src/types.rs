//! Core domain types: projects, devices and the user's selection

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Suffix of an Xcode project descriptor directory
pub const PROJECT_SUFFIX: &str = ".xcodeproj";

/// Suffix of an Xcode workspace descriptor directory
pub const WORKSPACE_SUFFIX: &str = ".xcworkspace";

/// Which kind of descriptor a project was discovered from
///
/// `xcodebuild` needs to be told which one it is looking at
/// (`-project` vs `-workspace`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    Project,
    Workspace,
}

impl DescriptorKind {
    /// Classify a path by its descriptor suffix
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(PROJECT_SUFFIX) {
            Some(DescriptorKind::Project)
        } else if name.ends_with(WORKSPACE_SUFFIX) {
            Some(DescriptorKind::Workspace)
        } else {
            None
        }
    }

    /// The `xcodebuild` flag selecting this descriptor kind
    pub fn as_flag(&self) -> &'static str {
        match self {
            DescriptorKind::Project => "-project",
            DescriptorKind::Workspace => "-workspace",
        }
    }

    /// The other kind, used when `xcodebuild` rejects the first guess
    pub fn other(&self) -> Self {
        match self {
            DescriptorKind::Project => DescriptorKind::Workspace,
            DescriptorKind::Workspace => DescriptorKind::Project,
        }
    }
}

/// Kind of execution target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    #[default]
    Simulator,
    /// Physical devices are part of the model but nothing enumerates them yet
    Device,
}

/// An execution target a built app can be installed and launched on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    /// Simulator UDID
    pub id: String,

    /// Human-readable name (e.g. "iPhone 15 Pro")
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: DeviceKind,

    /// Runtime label with the CoreSimulator prefix stripped (e.g. "iOS-17-0")
    #[serde(rename = "os")]
    pub os_label: String,
}

impl Device {
    pub fn simulator(
        id: impl Into<String>,
        name: impl Into<String>,
        os_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: DeviceKind::Simulator,
            os_label: os_label.into(),
        }
    }

    /// Composite label shown in the device chooser: `"name (os)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.os_label)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.os_label)
    }
}

/// A discovered Xcode project or workspace
///
/// Replaced wholesale on every refresh, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Absolute path to the descriptor
    pub path: PathBuf,

    /// Descriptor file name with its suffix stripped
    pub name: String,

    pub kind: DescriptorKind,

    /// Scheme names in `xcodebuild -list` order; empty means none found
    pub schemes: Vec<String>,

    /// Available devices; empty means none found
    pub devices: Vec<Device>,
}

impl Project {
    /// Find a device by its chooser label
    pub fn device_by_label(&self, label: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.label() == label)
    }
}

/// The scheme and device the user picked
///
/// Advisory UI state. It is never validated against the current project and
/// survives refreshes even when the new project no longer lists the values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Empty string means no scheme selected
    pub selected_scheme: String,
    pub selected_device: Option<Device>,
}

impl SelectionState {
    pub fn scheme(&self) -> Option<&str> {
        if self.selected_scheme.is_empty() {
            None
        } else {
            Some(&self.selected_scheme)
        }
    }

    pub fn device(&self) -> Option<&Device> {
        self.selected_device.as_ref()
    }
}
