//! Command construction for build, clean and run
//!
//! This module provides:
//! - `xcodebuild` invocations for build / clean / simulator builds
//! - `xcrun simctl` invocations for boot / install / launch
//! - Locating the built `.app` bundle under DerivedData

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use xcdemon_core::prelude::*;
use xcdemon_core::DescriptorKind;

use crate::process::ToolCommand;

/// DerivedData location used when none is configured
pub const DEFAULT_DERIVED_DATA: &str = "~/Library/Developer/Xcode/DerivedData";

/// Build configuration used for simulator runs when none is configured
pub const DEFAULT_CONFIGURATION: &str = "Debug";

/// What an `xcodebuild` invocation should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildAction {
    Build,
    /// Clean, then build
    Clean,
}

impl BuildAction {
    /// Trailing `xcodebuild` actions
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            BuildAction::Build => &["build"],
            BuildAction::Clean => &["clean", "build"],
        }
    }
}

/// `xcodebuild <-project|-workspace> <path> -scheme <scheme> <action...>`
pub fn xcodebuild_command(
    kind: DescriptorKind,
    descriptor: &Path,
    scheme: &str,
    action: BuildAction,
) -> ToolCommand {
    ToolCommand::new("xcodebuild")
        .arg(kind.as_flag())
        .path_arg(descriptor)
        .args(["-scheme", scheme])
        .args(action.args().iter().copied())
}

/// Destination specifier for a simulator: `platform=iOS Simulator,id=<id>`
pub fn destination(device_id: &str) -> String {
    format!("platform=iOS Simulator,id={}", device_id)
}

/// Build for a specific simulator
pub fn simulator_build_command(
    kind: DescriptorKind,
    descriptor: &Path,
    scheme: &str,
    device_id: &str,
    configuration: &str,
) -> ToolCommand {
    ToolCommand::new("xcodebuild")
        .arg(kind.as_flag())
        .path_arg(descriptor)
        .args(["-scheme", scheme])
        .arg("-destination")
        .arg(destination(device_id))
        .args(["-configuration", configuration])
        .arg("build")
}

/// `xcrun simctl boot <id>`
pub fn boot_simulator_command(device_id: &str) -> ToolCommand {
    ToolCommand::new("xcrun").args(["simctl", "boot", device_id])
}

/// `open -a Simulator`
pub fn open_simulator_command() -> ToolCommand {
    ToolCommand::new("open").args(["-a", "Simulator"])
}

/// `xcrun simctl install <id> <app>`
pub fn install_app_command(device_id: &str, app: &Path) -> ToolCommand {
    ToolCommand::new("xcrun")
        .args(["simctl", "install", device_id])
        .path_arg(app)
}

/// `defaults read <app>/Info.plist CFBundleIdentifier`
pub fn read_bundle_id_command(app: &Path) -> ToolCommand {
    ToolCommand::new("defaults")
        .arg("read")
        .path_arg(&app.join("Info.plist"))
        .arg("CFBundleIdentifier")
}

/// `xcrun simctl launch <id> <bundle id>`
pub fn launch_app_command(device_id: &str, bundle_id: &str) -> ToolCommand {
    ToolCommand::new("xcrun").args(["simctl", "launch", device_id, bundle_id])
}

/// Expand a leading `~/` against the home directory
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => {
                warn!("No home directory, using {} as is", path);
                PathBuf::from(path)
            }
        },
        None if path == "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

/// Directory holding the products of one configuration for the simulator SDK
///
/// `<derived_data>/<project>-<hash>/Build/Products/<configuration>-iphonesimulator`
fn products_dir(build_root: &Path, configuration: &str) -> PathBuf {
    build_root
        .join("Build")
        .join("Products")
        .join(format!("{}-iphonesimulator", configuration))
}

/// Find the built `.app` bundle for a project
///
/// Scans `<derived_data>/<project_name>-*/Build/Products/<configuration>-iphonesimulator`
/// for `*.app` directories. When several exist (stale DerivedData folders,
/// multiple app targets) the most recently modified bundle wins, ties broken
/// by path order.
pub fn locate_app_bundle(
    derived_data: &Path,
    project_name: &str,
    configuration: &str,
) -> Option<PathBuf> {
    let prefix = format!("{}-", project_name);

    let roots = match fs::read_dir(derived_data) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read DerivedData {:?}: {}", derived_data, e);
            return None;
        }
    };

    let mut bundles: Vec<(SystemTime, PathBuf)> = roots
        .flatten()
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&prefix))
        })
        .map(|entry| products_dir(&entry.path(), configuration))
        .filter_map(|dir| fs::read_dir(dir).ok())
        .flat_map(|entries| entries.flatten())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && path.extension().is_some_and(|ext| ext == "app"))
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .collect();

    bundles.sort_by(|(a_time, a_path), (b_time, b_path)| {
        b_time.cmp(a_time).then_with(|| a_path.cmp(b_path))
    });

    let found = bundles.into_iter().next().map(|(_, path)| path);
    debug!("App bundle for {}: {:?}", project_name, found);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_bundle(derived_data: &Path, folder: &str, configuration: &str, app: &str) -> PathBuf {
        let path = products_dir(&derived_data.join(folder), configuration).join(app);
        fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn test_build_command() {
        let cmd = xcodebuild_command(
            DescriptorKind::Project,
            Path::new("/w/App.xcodeproj"),
            "App",
            BuildAction::Build,
        );
        assert_eq!(
            cmd.to_string(),
            "xcodebuild -project /w/App.xcodeproj -scheme App build"
        );
    }

    #[test]
    fn test_clean_command_replaces_build_action() {
        let cmd = xcodebuild_command(
            DescriptorKind::Project,
            Path::new("/w/App.xcodeproj"),
            "App",
            BuildAction::Clean,
        );
        assert_eq!(cmd.args.last().map(String::as_str), Some("build"));
        assert_eq!(
            cmd.to_string(),
            "xcodebuild -project /w/App.xcodeproj -scheme App clean build"
        );
    }

    #[test]
    fn test_workspace_descriptor_uses_workspace_flag() {
        let cmd = xcodebuild_command(
            DescriptorKind::Workspace,
            Path::new("/w/App.xcworkspace"),
            "App",
            BuildAction::Build,
        );
        assert_eq!(cmd.args[0], "-workspace");
    }

    #[test]
    fn test_scheme_with_spaces_is_one_argument() {
        let cmd = xcodebuild_command(
            DescriptorKind::Project,
            Path::new("/w/My App.xcodeproj"),
            "App \"Staging\"",
            BuildAction::Build,
        );
        assert_eq!(
            cmd.args,
            vec!["-project", "/w/My App.xcodeproj", "-scheme", "App \"Staging\"", "build"]
        );
    }

    #[test]
    fn test_simulator_build_command() {
        let cmd = simulator_build_command(
            DescriptorKind::Project,
            Path::new("/w/App.xcodeproj"),
            "App",
            "ABC-123",
            "Debug",
        );
        assert_eq!(
            cmd.args,
            vec![
                "-project",
                "/w/App.xcodeproj",
                "-scheme",
                "App",
                "-destination",
                "platform=iOS Simulator,id=ABC-123",
                "-configuration",
                "Debug",
                "build",
            ]
        );
    }

    #[test]
    fn test_simctl_commands() {
        assert_eq!(
            boot_simulator_command("ABC").to_string(),
            "xcrun simctl boot ABC"
        );
        assert_eq!(open_simulator_command().to_string(), "open -a Simulator");
        assert_eq!(
            install_app_command("ABC", Path::new("/d/App.app")).to_string(),
            "xcrun simctl install ABC /d/App.app"
        );
        assert_eq!(
            read_bundle_id_command(Path::new("/d/App.app")).to_string(),
            "defaults read /d/App.app/Info.plist CFBundleIdentifier"
        );
        assert_eq!(
            launch_app_command("ABC", "com.example.app").to_string(),
            "xcrun simctl launch ABC com.example.app"
        );
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/Library"), home.join("Library"));
            assert_eq!(expand_home("~"), home);
        }
    }

    #[test]
    fn test_locate_app_bundle() {
        let temp = TempDir::new().unwrap();
        let expected = create_bundle(temp.path(), "App-abcdef", "Debug", "App.app");
        create_bundle(temp.path(), "Other-abcdef", "Debug", "Other.app");
        create_bundle(temp.path(), "App-abcdef", "Release", "App.app");

        assert_eq!(
            locate_app_bundle(temp.path(), "App", "Debug"),
            Some(expected)
        );
    }

    #[test]
    fn test_locate_app_bundle_ignores_non_bundles() {
        let temp = TempDir::new().unwrap();
        let products = products_dir(&temp.path().join("App-abcdef"), "Debug");
        fs::create_dir_all(products.join("App.swiftmodule")).unwrap();
        fs::write(products.join("App.app"), "not a directory").unwrap();

        assert_eq!(locate_app_bundle(temp.path(), "App", "Debug"), None);
    }

    #[test]
    fn test_locate_app_bundle_missing_derived_data() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            locate_app_bundle(&temp.path().join("missing"), "App", "Debug"),
            None
        );
    }
}
