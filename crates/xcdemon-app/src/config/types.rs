//! Configuration types for Xcode Demon
//!
//! Defines `Settings` (`.xcdemon/config.toml`) and its sections.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use xcdemon_core::DEFAULT_EXCLUDED_SEGMENTS;
use xcdemon_toolchain::commands::{expand_home, DEFAULT_CONFIGURATION, DEFAULT_DERIVED_DATA};

/// Application settings (.xcdemon/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub discovery: DiscoverySettings,

    #[serde(default)]
    pub run: RunSettings,

    #[serde(default)]
    pub terminal: TerminalSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Project / scheme / device discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiscoverySettings {
    /// Kill discovery commands (`xcodebuild -list`, `simctl list`) after this
    /// many seconds; `0` (the default) waits for them indefinitely
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Descriptors under a path segment with one of these names are ignored
    #[serde(default = "default_excluded_segments")]
    pub excluded_segments: Vec<String>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            excluded_segments: default_excluded_segments(),
        }
    }
}

impl DiscoverySettings {
    /// `None` when the timeout is disabled (`timeout_secs = 0`)
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

fn default_timeout_secs() -> u64 {
    0
}

fn default_excluded_segments() -> Vec<String> {
    DEFAULT_EXCLUDED_SEGMENTS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Settings for running on a simulator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunSettings {
    /// Build configuration passed to `xcodebuild -configuration`
    #[serde(default = "default_configuration")]
    pub configuration: String,

    /// DerivedData root searched for the built app; `~/` is expanded
    #[serde(default = "default_derived_data")]
    pub derived_data: String,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            configuration: default_configuration(),
            derived_data: default_derived_data(),
        }
    }
}

impl RunSettings {
    pub fn derived_data_path(&self) -> PathBuf {
        expand_home(&self.derived_data)
    }
}

fn default_configuration() -> String {
    DEFAULT_CONFIGURATION.to_string()
}

fn default_derived_data() -> String {
    DEFAULT_DERIVED_DATA.to_string()
}

/// Terminal surface settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TerminalSettings {
    /// Name of the terminal build/run commands are sent to
    #[serde(default = "default_terminal_name")]
    pub name: String,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            name: default_terminal_name(),
        }
    }
}

fn default_terminal_name() -> String {
    "XcDemon".to_string()
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Refresh whenever the panel becomes visible
    #[serde(default = "default_true")]
    pub refresh_on_visible: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            refresh_on_visible: true,
        }
    }
}

fn default_true() -> bool {
    true
}
