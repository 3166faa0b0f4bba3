//! iOS simulator discovery using xcrun simctl
//!
//! Lists available simulators with `xcrun simctl list devices available --json`
//! and keeps only devices under iOS runtimes.

use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use xcdemon_core::prelude::*;
use xcdemon_core::Device;

use crate::process::{LocalProcessRunner, ToolCommand};

/// Prefix of every CoreSimulator runtime identifier
pub const RUNTIME_PREFIX: &str = "com.apple.CoreSimulator.SimRuntime.";

/// Runtime identifiers of the iOS platform family
/// (e.g. `com.apple.CoreSimulator.SimRuntime.iOS-17-0`)
static IOS_RUNTIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^com\.apple\.CoreSimulator\.SimRuntime\.iOS").expect("Invalid iOS runtime regex")
});

/// JSON output from `xcrun simctl list devices --json`
///
/// Runtime groups are kept in key order so repeated listings produce the same
/// device order.
#[derive(Debug, Deserialize)]
struct SimctlOutput {
    devices: BTreeMap<String, Vec<SimctlDevice>>,
}

#[derive(Debug, Deserialize)]
struct SimctlDevice {
    udid: String,
    name: String,
    #[serde(rename = "isAvailable", default)]
    is_available: bool,
}

/// `xcrun simctl list devices available --json`
pub fn list_devices_command() -> ToolCommand {
    ToolCommand::new("xcrun").args(["simctl", "list", "devices", "available", "--json"])
}

/// Check whether a runtime identifier belongs to the iOS platform family
pub fn is_ios_runtime(runtime_key: &str) -> bool {
    IOS_RUNTIME.is_match(runtime_key)
}

/// Strip the CoreSimulator prefix from a runtime identifier
///
/// "com.apple.CoreSimulator.SimRuntime.iOS-17-0" -> "iOS-17-0"
pub fn os_label(runtime_key: &str) -> &str {
    runtime_key
        .strip_prefix(RUNTIME_PREFIX)
        .unwrap_or(runtime_key)
}

/// Parse simctl JSON into available iOS simulators
pub fn parse_devices_output(json: &str) -> Result<Vec<Device>> {
    let parsed: SimctlOutput = serde_json::from_str(json)
        .map_err(|e| Error::protocol(format!("Failed to parse simctl output: {}", e)))?;

    let devices = parsed
        .devices
        .iter()
        .filter(|(runtime_key, _)| is_ios_runtime(runtime_key))
        .flat_map(|(runtime_key, devices)| {
            let label = os_label(runtime_key);
            devices
                .iter()
                .filter(|device| device.is_available)
                .map(move |device| Device::simulator(&device.udid, &device.name, label))
        })
        .collect();

    Ok(devices)
}

/// List available iOS simulators
///
/// Any failure (missing tool, non-zero exit, malformed JSON) is logged and
/// yields an empty list.
pub async fn list_devices<R: LocalProcessRunner>(runner: &R) -> Vec<Device> {
    let command = list_devices_command();

    let output = match runner.run(&command).await {
        Ok(output) => output,
        Err(e) => {
            error!("Error getting devices: {}", e);
            return Vec::new();
        }
    };

    let output = match output.into_success("xcrun simctl") {
        Ok(output) => output,
        Err(e) => {
            error!("Error getting devices: {}", e);
            return Vec::new();
        }
    };

    match parse_devices_output(&output.stdout) {
        Ok(devices) => {
            info!("Discovered {} simulators", devices.len());
            devices
        }
        Err(e) => {
            error!("Error getting devices: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeRunner;
    use crate::ToolOutput;
    use xcdemon_core::DeviceKind;

    const SIMCTL_JSON: &str = r#"{
        "devices": {
            "com.apple.CoreSimulator.SimRuntime.watchOS-10-0": [
                {
                    "udid": "WATCH-1",
                    "name": "Apple Watch Series 9 (45mm)",
                    "state": "Shutdown",
                    "isAvailable": true
                }
            ],
            "com.apple.CoreSimulator.SimRuntime.iOS-17-0": [
                {
                    "udid": "A1B2C3D4-0000-0000-0000-000000000001",
                    "name": "iPhone 15 Pro",
                    "state": "Shutdown",
                    "isAvailable": true,
                    "deviceTypeIdentifier": "com.apple.CoreSimulator.SimDeviceType.iPhone-15-Pro"
                },
                {
                    "udid": "A1B2C3D4-0000-0000-0000-000000000002",
                    "name": "iPhone 14",
                    "state": "Shutdown",
                    "isAvailable": false
                }
            ],
            "com.apple.CoreSimulator.SimRuntime.iOS-16-4": [
                {
                    "udid": "A1B2C3D4-0000-0000-0000-000000000003",
                    "name": "iPad Air (5th generation)",
                    "state": "Booted",
                    "isAvailable": true
                }
            ],
            "com.apple.CoreSimulator.SimRuntime.tvOS-17-0": []
        }
    }"#;

    #[test]
    fn test_single_available_ios_device() {
        let json = r#"{
            "devices": {
                "com.apple.CoreSimulator.SimRuntime.iOS-17-0": [
                    {"udid": "ABC", "name": "iPhone 15", "isAvailable": true}
                ]
            }
        }"#;

        let devices = parse_devices_output(json).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "ABC");
        assert_eq!(devices[0].name, "iPhone 15");
        assert_eq!(devices[0].kind, DeviceKind::Simulator);
        assert_eq!(devices[0].os_label, "iOS-17-0");
    }

    #[test]
    fn test_filters_platform_and_availability() {
        let devices = parse_devices_output(SIMCTL_JSON).unwrap();

        let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "A1B2C3D4-0000-0000-0000-000000000003",
                "A1B2C3D4-0000-0000-0000-000000000001",
            ]
        );
        assert_eq!(devices[0].os_label, "iOS-16-4");
        assert_eq!(devices[1].os_label, "iOS-17-0");
    }

    #[test]
    fn test_missing_availability_flag_is_unavailable() {
        let json = r#"{"devices": {"com.apple.CoreSimulator.SimRuntime.iOS-17-0": [
            {"udid": "ABC", "name": "iPhone 15"}
        ]}}"#;

        assert!(parse_devices_output(json).unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_devices_output("xcrun: error: unable to find utility").unwrap_err();
        assert!(matches!(err, Error::Protocol { .. }));
    }

    #[test]
    fn test_os_label() {
        assert_eq!(os_label("com.apple.CoreSimulator.SimRuntime.iOS-17-0"), "iOS-17-0");
        assert_eq!(os_label("custom-runtime"), "custom-runtime");
    }

    #[test]
    fn test_is_ios_runtime() {
        assert!(is_ios_runtime("com.apple.CoreSimulator.SimRuntime.iOS-17-0"));
        assert!(!is_ios_runtime("com.apple.CoreSimulator.SimRuntime.watchOS-10-0"));
        assert!(!is_ios_runtime("com.apple.CoreSimulator.SimRuntime.xrOS-1-0"));
    }

    #[test]
    fn test_list_devices_command_args() {
        let cmd = list_devices_command();
        assert_eq!(cmd.to_string(), "xcrun simctl list devices available --json");
    }

    #[tokio::test]
    async fn test_list_devices_success() {
        let runner = FakeRunner::new().respond(list_devices_command(), ToolOutput::ok(SIMCTL_JSON));

        let devices = list_devices(&runner).await;
        assert_eq!(devices.len(), 2);
    }

    #[tokio::test]
    async fn test_list_devices_tool_failure_is_empty() {
        let runner =
            FakeRunner::new().respond(list_devices_command(), ToolOutput::failed(72, "no xcode"));
        assert!(list_devices(&runner).await.is_empty());

        let runner = FakeRunner::new().missing_tool("xcrun");
        assert!(list_devices(&runner).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_devices_bad_json_is_empty() {
        let runner = FakeRunner::new().respond(list_devices_command(), ToolOutput::ok("{"));
        assert!(list_devices(&runner).await.is_empty());
    }
}
