//! Settings parser for .xcdemon/config.toml

use super::types::Settings;
use std::path::Path;
use xcdemon_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const XCDEMON_DIR: &str = ".xcdemon";

/// Load settings from `.xcdemon/config.toml`
///
/// A missing file, an unreadable file and invalid TOML all fall back to
/// defaults; the latter two are logged.
pub fn load_settings(workspace_root: &Path) -> Settings {
    let config_path = workspace_root.join(XCDEMON_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create `.xcdemon/config.toml` with commented defaults if it does not exist
pub fn init_config_dir(workspace_root: &Path) -> Result<()> {
    let xcdemon_dir = workspace_root.join(XCDEMON_DIR);

    if !xcdemon_dir.exists() {
        std::fs::create_dir_all(&xcdemon_dir)
            .map_err(|e| Error::config(format!("Failed to create .xcdemon dir: {}", e)))?;
    }

    let config_path = xcdemon_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Xcode Demon Configuration

[discovery]
timeout_secs = 0                 # Seconds before discovery commands are killed; 0 waits forever
excluded_segments = [".build"]   # Ignore descriptors under these directories

[run]
configuration = "Debug"
derived_data = "~/Library/Developer/Xcode/DerivedData"

[terminal]
name = "XcDemon"

[ui]
refresh_on_visible = true
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}
