//! Configuration structures for release pipeline operations.
//!
//! Provides the typed settings consumed by the pipeline: product metadata,
//! freeze tool configuration, installer toolchain configuration, and a
//! builder pattern for constructing them.

mod builder;
mod core;
mod freeze;
mod installer;
mod package;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use freeze::FreezeSettings;
pub use installer::{InstallerSettings, ProgramFilesFolder};
pub use package::PackageSettings;
