//! Configuration file parsing for Xcode Demon
//!
//! Supports:
//! - `.xcdemon/config.toml` - Global settings

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings};
pub use types::*;
