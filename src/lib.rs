//! Xcode Demon
//!
//! A terminal panel for building and running Xcode projects on iOS
//! simulators. The binary picks between the TUI and headless mode; this
//! library holds what both share at the top level.

pub mod headless;

use std::path::PathBuf;

use xcdemon_core::prelude::*;

pub use headless::run_headless;

/// Resolve command-line paths into canonical workspace roots
///
/// With no paths the current directory is the only root. Order is kept;
/// the first root is the one searched for a project.
pub fn resolve_workspace_roots(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let paths = if paths.is_empty() {
        vec![std::env::current_dir()?]
    } else {
        paths
    };

    paths
        .into_iter()
        .map(|path| {
            dunce::canonicalize(&path).map_err(|e| {
                Error::discovery(format!(
                    "Workspace root {} is not accessible: {}",
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}
