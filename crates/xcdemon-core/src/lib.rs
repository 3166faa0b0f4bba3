//! # xcdemon-core - Core Domain Types
//!
//! Foundation crate for Xcode Demon. Provides domain types, error handling,
//! logging setup, and project discovery.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Project`] - A discovered project/workspace with its schemes and devices
//! - [`Device`] - An execution target (iOS simulator)
//! - [`DescriptorKind`] - `.xcodeproj` vs `.xcworkspace`
//! - [`SelectionState`] - The scheme and device the user picked
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Project Discovery (`discovery`)
//! - [`find_project()`] - Locate the descriptor in a workspace root
//! - [`project_name()`] - Derive the project name from a descriptor path
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use xcdemon_core::prelude::*;
//! ```

pub mod discovery;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod types;

pub use discovery::{
    find_project, find_project_excluding, project_name, DEFAULT_EXCLUDED_SEGMENTS,
};
pub use error::{Error, Result, ResultExt};
pub use types::{
    DescriptorKind, Device, DeviceKind, Project, SelectionState, PROJECT_SUFFIX,
    WORKSPACE_SUFFIX,
};
