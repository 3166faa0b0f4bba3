//! Tool availability checking
//!
//! Probes for the external tools the demon drives: `xcodebuild` (scheme
//! listing, build, clean) and `xcrun simctl` (simulator listing and control).

/// Cached availability of external tools
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolAvailability {
    /// Whether `xcodebuild` is on the PATH
    pub xcodebuild: bool,

    /// Whether `xcrun simctl` is available (macOS with Xcode)
    pub xcrun_simctl: bool,
}

impl ToolAvailability {
    /// Check tool availability (run once at startup)
    pub async fn check() -> Self {
        let xcodebuild = Self::check_xcodebuild();
        let xcrun_simctl = Self::check_xcrun_simctl().await;

        if !xcodebuild {
            tracing::warn!("xcodebuild not found on PATH");
        }
        if !xcrun_simctl {
            tracing::warn!("xcrun simctl not available");
        }

        Self {
            xcodebuild,
            xcrun_simctl,
        }
    }

    fn check_xcodebuild() -> bool {
        which::which("xcodebuild")
            .inspect_err(|e| tracing::debug!("xcodebuild lookup failed: {}", e))
            .is_ok()
    }

    /// Check if xcrun simctl is available
    async fn check_xcrun_simctl() -> bool {
        // Only available on macOS
        #[cfg(not(target_os = "macos"))]
        return false;

        #[cfg(target_os = "macos")]
        {
            use std::process::Stdio;
            use tokio::process::Command;

            Command::new("xcrun")
                .args(["simctl", "help"])
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .map(|s| s.success())
                .inspect_err(|e| tracing::debug!("xcrun simctl check failed: {}", e))
                .unwrap_or(false)
        }
    }

    /// Both tools present
    pub fn all_available(&self) -> bool {
        self.xcodebuild && self.xcrun_simctl
    }

    /// Get user-friendly message for a missing `xcodebuild`
    pub fn xcodebuild_unavailable_message(&self) -> Option<&'static str> {
        if self.xcodebuild {
            None
        } else {
            Some("xcodebuild not found. Install Xcode and run xcode-select --install.")
        }
    }

    /// Get user-friendly message for unavailable simulator tools
    pub fn simulator_unavailable_message(&self) -> Option<&'static str> {
        if self.xcrun_simctl {
            None
        } else {
            #[cfg(target_os = "macos")]
            {
                Some("Xcode not installed. Install Xcode to manage iOS simulators.")
            }

            #[cfg(not(target_os = "macos"))]
            {
                Some("iOS simulators are only available on macOS.")
            }
        }
    }

    /// All messages for missing tools, in display order
    pub fn unavailable_messages(&self) -> Vec<&'static str> {
        [
            self.xcodebuild_unavailable_message(),
            self.simulator_unavailable_message(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_availability_default() {
        let availability = ToolAvailability::default();
        assert!(!availability.xcodebuild);
        assert!(!availability.xcrun_simctl);
        assert!(!availability.all_available());
    }

    #[test]
    fn test_unavailable_messages() {
        let availability = ToolAvailability::default();
        assert!(availability.xcodebuild_unavailable_message().is_some());
        assert!(availability.simulator_unavailable_message().is_some());
        assert_eq!(availability.unavailable_messages().len(), 2);
    }

    #[test]
    fn test_available_no_message() {
        let availability = ToolAvailability {
            xcodebuild: true,
            xcrun_simctl: true,
        };
        assert!(availability.all_available());
        assert!(availability.unavailable_messages().is_empty());
    }

    #[test]
    fn test_partial_availability() {
        let availability = ToolAvailability {
            xcodebuild: true,
            xcrun_simctl: false,
        };
        assert_eq!(
            availability.unavailable_messages(),
            vec![availability.simulator_unavailable_message().unwrap()]
        );
    }

    #[cfg(not(target_os = "macos"))]
    #[tokio::test]
    async fn test_simctl_never_available_off_macos() {
        assert!(!ToolAvailability::check().await.xcrun_simctl);
    }
}
