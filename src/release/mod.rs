//! Release pipeline for frozen desktop applications.
//!
//! Turns an application that a freeze tool can bundle into a shippable
//! Windows release: a zip archive of the frozen build, a WiX installer
//! manifest with stable component GUIDs, and a compiled MSI.
//!
//! # Configuration
//!
//! The pipeline is configured via `frostpack.toml`:
//!
//! ```toml
//! [package]
//! product_name = "Gizmo Studio"
//! manufacturer = "Gizmo Works"
//!
//! [freeze]
//! command = "pyinstaller"
//! args = ["gizmo.spec"]
//! dist_dir = "dist/gizmo"
//!
//! [installer]
//! upgrade_code = "7F98EF99-04D1-46BF-AAB3-2DCF11BB4B26"
//! ```
//!
//! # Steps
//!
//! | Step | Produces | Notes |
//! |-----------|----------------------------|----------------------------------|
//! | freeze | distribution folder | runs the configured freeze tool |
//! | archive | `{slug}_{version}.zip` | deterministic entry order |
//! | manifest | `{slug}.wxs` + GUID record | GUIDs stable across releases |
//! | installer | `{slug}_{version}.msi` | candle + light |
//!
//! # Integration
//!
//! ```no_run
//! use frostpack::release::{FreezeSettings, PackageSettings, Pipeline, SettingsBuilder};
//!
//! # async fn example() -> frostpack::release::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .package_settings(PackageSettings {
//!         product_name: "Gizmo Studio".to_string(),
//!         manufacturer: "Gizmo Works".to_string(),
//!         description: None,
//!         homepage: None,
//!     })
//!     .freeze_settings(FreezeSettings {
//!         command: "pyinstaller".to_string(),
//!         args: vec!["gizmo.spec".to_string()],
//!         dist_dir: "dist/gizmo".into(),
//!     })
//!     .build()?;
//!
//! let report = Pipeline::new(settings).run(Some("1.2.3")).await?;
//! assert!(report.success());
//! # Ok(())
//! # }
//! ```
//!
//! # Identifier stability
//!
//! Windows matches installed components by GUID during upgrades; components
//! whose GUIDs change are treated as removals plus new installs. The
//! pipeline therefore persists every path→GUID assignment in a JSON record
//! next to the manifest and feeds it back into the next release. See
//! [`IdentifierRecord`].

#![warn(missing_docs)]

mod error;
mod pipeline;
mod settings;
mod utils;
mod wix;

// Public re-exports
pub use error::{Context, Error, ErrorExt, Result};
pub use pipeline::{
    FailureMode, Pipeline, PipelineReport, StepKind, StepOutcome, StepReport, artifact_sha256,
    generate_manifest_files,
};
pub use settings::{
    FreezeSettings, InstallerSettings, PackageSettings, ProgramFilesFolder, Settings,
    SettingsBuilder,
};
pub use wix::{
    GeneratedManifest, HarvestedDir, HarvestedFile, IdentifierAllocator, IdentifierRecord,
    generate, harvest, mint_guid, normalize_rel_path,
};

/// Artifact metadata for one completed pipeline step.
#[derive(Debug, Clone)]
pub struct StepArtifact {
    /// Paths to all files the step created or validated.
    ///
    /// The first entry is the step's primary artifact; some steps also
    /// produce companions (the manifest step writes the document and the
    /// identifier record).
    pub paths: Vec<std::path::PathBuf>,

    /// Total size of the artifact paths in bytes. Directories are summed
    /// recursively.
    pub size: u64,

    /// SHA-256 checksum of the primary artifact for integrity
    /// verification.
    ///
    /// This can be published alongside the artifact for users to verify
    /// downloads.
    pub checksum: String,
}
