//! Scheme discovery using `xcodebuild -list`

use std::path::Path;

use xcdemon_core::prelude::*;
use xcdemon_core::DescriptorKind;

use crate::process::{LocalProcessRunner, ToolCommand};

/// Section header preceding the scheme names
const SCHEMES_HEADER: &str = "Schemes:";

/// Lines containing these markers are never scheme names
const EXCLUDED_MARKERS: &[&str] = &["User", "Shared"];

/// `xcodebuild -list <-project|-workspace> <path>`
pub fn list_command(kind: DescriptorKind, descriptor: &Path) -> ToolCommand {
    ToolCommand::new("xcodebuild")
        .arg("-list")
        .arg(kind.as_flag())
        .path_arg(descriptor)
}

/// Parse the output of `xcodebuild -list`
///
/// Collects every non-blank line after the first line containing
/// `Schemes:`, trimmed, skipping lines that mention `User` or `Shared`.
/// Stops at the first blank line after the header.
///
/// Returns `None` if there is no `Schemes:` header at all.
///
/// ```text
/// Information about project "App":
///     Targets:
///         App
///
///     Schemes:
///         App
///         AppTests
/// ```
pub fn parse_schemes(output: &str) -> Option<Vec<String>> {
    let mut lines = output.lines();
    lines.by_ref().find(|line| line.contains(SCHEMES_HEADER))?;

    let schemes = lines
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .filter(|line| !EXCLUDED_MARKERS.iter().any(|m| line.contains(m)))
        .map(str::to_string)
        .collect();

    Some(schemes)
}

/// List the schemes of a descriptor
///
/// Tries the mode matching the descriptor's suffix first and falls back to the
/// other one when `xcodebuild` exits non-zero. Every failure degrades to an
/// empty list and is logged.
pub async fn list_schemes<R: LocalProcessRunner>(
    runner: &R,
    descriptor: &Path,
    kind: DescriptorKind,
) -> Vec<String> {
    debug!("Getting schemes for: {:?}", descriptor);

    for mode in [kind, kind.other()] {
        let command = list_command(mode, descriptor);
        let output = match runner.run(&command).await {
            Ok(output) => output,
            Err(e @ Error::ToolNotFound { .. }) => {
                warn!("Cannot list schemes: {}", e);
                return Vec::new();
            }
            Err(e) => {
                warn!("xcodebuild -list {} failed: {}", mode.as_flag(), e);
                continue;
            }
        };

        if !output.success() {
            debug!(
                "xcodebuild -list {} exited with {:?}: {}",
                mode.as_flag(),
                output.code,
                output.stderr.trim_end()
            );
            continue;
        }

        return match parse_schemes(&output.stdout) {
            Some(schemes) => {
                info!("Found {} schemes", schemes.len());
                schemes
            }
            None => {
                warn!("No 'Schemes:' section in xcodebuild output");
                Vec::new()
            }
        };
    }

    warn!("xcodebuild -list failed for {:?}", descriptor);
    Vec::new()
}
