//! Manifest generation entry point.
//!
//! [`generate`] is a pure function over its inputs: the same folder
//! contents, version, settings, and prior identifier record always produce
//! the same manifest document and the same new record. All filesystem writes
//! are left to the caller.

use std::path::Path;

use crate::release::error::{Error, Result};
use crate::release::settings::{InstallerSettings, PackageSettings};
use crate::release::wix::document;
use crate::release::wix::harvest;
use crate::release::wix::ids::{IdentifierAllocator, IdentifierRecord};

/// Output of one manifest generation pass.
#[derive(Debug)]
pub struct GeneratedManifest {
    /// Rendered manifest document, ready to be written to disk.
    pub document: String,

    /// Identifier record for the files in this pass. Contains exactly the
    /// paths present in the harvested tree; entries for files that no longer
    /// exist are dropped.
    pub record: IdentifierRecord,

    /// Number of payload files harvested.
    pub files: usize,

    /// Number of directories harvested (excluding the root).
    pub directories: usize,

    /// Number of GUIDs minted fresh (not carried over from the prior record).
    pub minted: usize,
}

/// Generates the installer manifest for `folder`.
///
/// Harvests the folder, assigns component GUIDs (reusing `prior` where a
/// path already has one), and renders the manifest document.
///
/// # Arguments
///
/// * `folder` - Root of the payload tree to describe
/// * `version` - Product version string; must be non-blank
/// * `prior` - Identifier record from the previous release, or empty
/// * `package` - Product metadata
/// * `installer` - Installer settings
///
/// # Errors
///
/// * [`Error::MissingVersion`] when `version` is blank
/// * [`Error::MissingFolder`] / [`Error::EmptyFolder`] from harvesting
/// * [`Error::DuplicateIdentifier`] when `prior` maps two paths to one GUID
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use frostpack::release::{IdentifierRecord, InstallerSettings, PackageSettings, generate};
///
/// # fn main() -> frostpack::release::Result<()> {
/// let package = PackageSettings {
///     product_name: "Gizmo Studio".to_string(),
///     manufacturer: "Gizmo Works".to_string(),
///     description: None,
///     homepage: None,
/// };
/// let manifest = generate(
///     Path::new("dist"),
///     "1.2.3",
///     &IdentifierRecord::default(),
///     &package,
///     &InstallerSettings::default(),
/// )?;
/// println!("{} files, {} new GUIDs", manifest.files, manifest.minted);
/// # Ok(())
/// # }
/// ```
pub fn generate(
    folder: &Path,
    version: &str,
    prior: &IdentifierRecord,
    package: &PackageSettings,
    installer: &InstallerSettings,
) -> Result<GeneratedManifest> {
    if version.trim().is_empty() {
        return Err(Error::MissingVersion);
    }

    let tree = harvest::harvest(folder)?;
    log::debug!(
        "Harvested {} files across {} directories from {}",
        tree.file_count(),
        tree.dir_count(),
        folder.display()
    );

    let mut allocator = IdentifierAllocator::new(installer.upgrade_code, prior);
    let document = document::render(&tree, version, package, installer, &mut allocator)?;

    let files = tree.file_count();
    let directories = tree.dir_count();
    let minted = allocator.minted();
    let record = allocator.into_record();

    log::debug!(
        "Assigned {} component GUIDs ({} newly minted)",
        record.len(),
        minted
    );

    Ok(GeneratedManifest {
        document,
        record,
        files,
        directories,
        minted,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use uuid::Uuid;

    use super::*;

    fn package() -> PackageSettings {
        PackageSettings {
            product_name: "Gizmo Studio".to_string(),
            manufacturer: "Gizmo Works".to_string(),
            description: None,
            homepage: None,
        }
    }

    fn installer() -> InstallerSettings {
        InstallerSettings {
            upgrade_code: Uuid::parse_str("7f98ef99-04d1-46bf-aab3-2dcf11bb4b26").unwrap(),
            ..InstallerSettings::default()
        }
    }

    fn payload() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.exe"), b"binary").unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/config.json"), b"{}").unwrap();
        dir
    }

    #[test]
    fn repeated_generation_is_identical() {
        let dir = payload();
        let prior = IdentifierRecord::default();

        let first = generate(dir.path(), "1.0.0", &prior, &package(), &installer()).unwrap();
        let second = generate(dir.path(), "1.0.0", &prior, &package(), &installer()).unwrap();

        assert_eq!(first.document, second.document);
        assert_eq!(
            serde_json::to_string(&first.record).unwrap(),
            serde_json::to_string(&second.record).unwrap()
        );
    }

    #[test]
    fn prior_record_guids_are_reused() {
        let dir = payload();

        let first = generate(
            dir.path(),
            "1.0.0",
            &IdentifierRecord::default(),
            &package(),
            &installer(),
        )
        .unwrap();
        assert_eq!(first.minted, 2);

        fs::write(dir.path().join("extra.txt"), b"new").unwrap();
        let second = generate(dir.path(), "1.1.0", &first.record, &package(), &installer()).unwrap();

        assert_eq!(second.minted, 1);
        assert_eq!(second.files, 3);
        assert_eq!(
            first.record.get("app.exe"),
            second.record.get("app.exe"),
            "existing GUIDs must survive a release"
        );
        assert_eq!(
            first.record.get("data/config.json"),
            second.record.get("data/config.json")
        );
    }

    #[test]
    fn record_tracks_only_current_files() {
        let dir = payload();
        let first = generate(
            dir.path(),
            "1.0.0",
            &IdentifierRecord::default(),
            &package(),
            &installer(),
        )
        .unwrap();

        fs::remove_file(dir.path().join("data/config.json")).unwrap();
        let second = generate(dir.path(), "1.0.1", &first.record, &package(), &installer()).unwrap();

        assert!(second.record.get("app.exe").is_some());
        assert!(second.record.get("data/config.json").is_none());
    }

    #[test]
    fn blank_version_is_rejected() {
        let dir = payload();
        let err = generate(
            dir.path(),
            "  ",
            &IdentifierRecord::default(),
            &package(),
            &installer(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingVersion));
    }

    #[test]
    fn duplicate_prior_guids_are_rejected() {
        let dir = payload();
        let mut prior = IdentifierRecord::default();
        let guid = "DEADBEEF-0000-4000-8000-000000000001".to_string();
        prior.insert("app.exe".to_string(), guid.clone());
        prior.insert("data/config.json".to_string(), guid);

        let err = generate(dir.path(), "1.0.0", &prior, &package(), &installer()).unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentifier { .. }));
    }
}
