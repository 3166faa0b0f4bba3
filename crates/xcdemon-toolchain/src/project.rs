//! Project info composition: name + schemes + devices

use std::path::Path;

use xcdemon_core::prelude::*;
use xcdemon_core::{project_name, DescriptorKind, Project};

use crate::process::LocalProcessRunner;
use crate::schemes::list_schemes;
use crate::simulators::list_devices;

/// Build a [`Project`] for a discovered descriptor
///
/// Scheme and device lookups never fail this call; they degrade to empty
/// lists. The only error is a descriptor whose name cannot be derived.
pub async fn project_info<R: LocalProcessRunner>(runner: &R, descriptor: &Path) -> Result<Project> {
    let name = project_name(descriptor).ok_or_else(|| Error::invalid_descriptor(descriptor))?;
    let kind = DescriptorKind::from_path(descriptor).unwrap_or(DescriptorKind::Project);

    let schemes = list_schemes(runner, descriptor, kind).await;
    let devices = list_devices(runner).await;

    info!(
        "Project {} ({} schemes, {} devices)",
        name,
        schemes.len(),
        devices.len()
    );

    Ok(Project {
        path: descriptor.to_path_buf(),
        name,
        kind,
        schemes,
        devices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemes::list_command;
    use crate::simulators::list_devices_command;
    use crate::test_utils::FakeRunner;
    use crate::ToolOutput;

    const DEVICES_JSON: &str = r#"{"devices": {"com.apple.CoreSimulator.SimRuntime.iOS-17-0": [
        {"udid": "ABC", "name": "iPhone 15", "isAvailable": true}
    ]}}"#;

    #[tokio::test]
    async fn test_project_info_composes_all_parts() {
        let path = Path::new("/w/Foo.xcodeproj");
        let runner = FakeRunner::new()
            .respond(
                list_command(DescriptorKind::Project, path),
                ToolOutput::ok("Schemes:\n  Foo\n\n"),
            )
            .respond(list_devices_command(), ToolOutput::ok(DEVICES_JSON));

        let project = project_info(&runner, path).await.unwrap();
        assert_eq!(project.name, "Foo");
        assert_eq!(project.kind, DescriptorKind::Project);
        assert_eq!(project.schemes, vec!["Foo"]);
        assert_eq!(project.devices.len(), 1);
        assert_eq!(project.devices[0].os_label, "iOS-17-0");
    }

    #[tokio::test]
    async fn test_project_info_degrades_tool_failures() {
        let runner = FakeRunner::new()
            .missing_tool("xcodebuild")
            .missing_tool("xcrun");

        let project = project_info(&runner, Path::new("/w/Foo.xcworkspace"))
            .await
            .unwrap();
        assert_eq!(project.name, "Foo");
        assert_eq!(project.kind, DescriptorKind::Workspace);
        assert!(project.schemes.is_empty());
        assert!(project.devices.is_empty());
    }

    #[tokio::test]
    async fn test_project_info_rejects_nameless_descriptor() {
        let runner = FakeRunner::new();
        let err = project_info(&runner, Path::new("/w/.xcodeproj"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDescriptor { .. }));
        assert!(runner.calls().is_empty());
    }
}
