//! Xcode project discovery module
//!
//! Looks for a project (`*.xcodeproj`) or workspace (`*.xcworkspace`)
//! descriptor among the immediate entries of a workspace root. Nothing below
//! the root is searched.

use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, trace, warn};

use crate::types::DescriptorKind;

/// Path segments that mark build output; descriptors below them are ignored
pub const DEFAULT_EXCLUDED_SEGMENTS: &[&str] = &[".build"];

/// Matches the descriptor suffix for name derivation
static DESCRIPTOR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(xcodeproj|xcworkspace)$").expect("valid regex"));

/// Find the project descriptor in a workspace root
///
/// Uses the default excluded segments. See [`find_project_excluding`].
pub fn find_project(root: &Path) -> Option<PathBuf> {
    find_project_excluding(root, DEFAULT_EXCLUDED_SEGMENTS)
}

/// Find the project descriptor in a workspace root
///
/// Only the immediate entries of `root` are considered. An entry matches when
/// its name ends in `.xcodeproj` or `.xcworkspace`, a project name can be
/// derived from it, and no component of its path equals one of
/// `excluded_segments`.
///
/// When several entries match, the lexicographically smallest path wins so
/// the result does not depend on directory iteration order.
///
/// Read errors are logged and reported as `None`.
pub fn find_project_excluding<S: AsRef<str>>(
    root: &Path,
    excluded_segments: &[S],
) -> Option<PathBuf> {
    debug!("Searching for Xcode project in: {:?}", root);

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Cannot read workspace root {:?}: {}", root, err);
            return None;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| DescriptorKind::from_path(path).is_some())
        .filter(|path| {
            let named = project_name(path).is_some();
            if !named {
                trace!("Skipping descriptor without a name: {:?}", path);
            }
            named
        })
        .filter(|path| {
            let excluded = is_excluded(path, excluded_segments);
            if excluded {
                trace!("Skipping descriptor under build output: {:?}", path);
            }
            !excluded
        })
        .collect();

    candidates.sort();

    if candidates.len() > 1 {
        debug!(
            "Found {} descriptors, using {:?}",
            candidates.len(),
            candidates[0]
        );
    }

    let found = candidates.into_iter().next();
    debug!("Find result: {:?}", found);
    found
}

/// Check if any component of `path` is an excluded segment
fn is_excluded<S: AsRef<str>>(path: &Path, excluded_segments: &[S]) -> bool {
    path.components().any(|component| match component {
        Component::Normal(segment) => excluded_segments
            .iter()
            .any(|excluded| segment.to_str() == Some(excluded.as_ref())),
        _ => false,
    })
}

/// Derive a project name from its descriptor path
///
/// `/work/Foo.xcodeproj` → `Foo`. Returns `None` when the path has no final
/// segment or the stripped name is empty.
pub fn project_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let name = DESCRIPTOR_SUFFIX.replace(file_name, "");
    if name.is_empty() {
        None
    } else {
        Some(name.into_owned())
    }
}
