//! Manifest step: generate the installer manifest and identifier record.
//!
//! Loads the prior identifier record, runs the pure generator over the
//! frozen build folder, then writes the manifest document and the new
//! record side by side in the output directory. The record write is what
//! makes the next release's GUIDs stable.

use std::path::{Path, PathBuf};

use crate::release::error::{Error, ErrorExt, Result};
use crate::release::settings::Settings;
use crate::release::utils::fs;
use crate::release::wix::{self, IdentifierRecord};

/// Generates the manifest for the configured distribution directory,
/// using the default document and record locations in the output
/// directory.
pub async fn run(settings: &Settings, version: &str) -> Result<Vec<PathBuf>> {
    let folder = settings.dist_dir().to_path_buf();
    let document_path = settings.manifest_path();
    let record_path = settings.record_path();
    run_with(settings, &folder, version, &record_path, &document_path).await
}

/// Generates the manifest for an explicit folder and output locations.
///
/// Used directly by the `manifest` subcommand, which points it at
/// arbitrary folders and paths.
///
/// # Returns
///
/// The written paths: `[document, record]`.
pub async fn run_with(
    settings: &Settings,
    folder: &Path,
    version: &str,
    record_path: &Path,
    document_path: &Path,
) -> Result<Vec<PathBuf>> {
    log::info!(
        "Generating installer manifest for {} v{}",
        settings.product_name(),
        version
    );

    let prior = IdentifierRecord::load(record_path)?;
    if !prior.is_empty() {
        log::debug!(
            "Loaded {} prior identifier assignments from {}",
            prior.len(),
            record_path.display()
        );
    }

    // Harvesting walks the whole frozen tree, so it runs off the runtime.
    let task_folder = folder.to_path_buf();
    let task_version = version.to_string();
    let package = settings.package().clone();
    let installer = settings.installer().clone();
    let manifest = tokio::task::spawn_blocking(move || {
        wix::generate(&task_folder, &task_version, &prior, &package, &installer)
    })
    .await
    .map_err(|e| Error::GenericError(format!("manifest task failed: {e}")))??;

    fs::ensure_parent(document_path).await?;
    tokio::fs::write(document_path, &manifest.document)
        .await
        .fs_context("writing manifest document", document_path)?;
    manifest.record.save(record_path)?;

    log::info!(
        "✓ Manifest covers {} files in {} directories ({} new GUIDs)",
        manifest.files,
        manifest.directories,
        manifest.minted
    );
    Ok(vec![document_path.to_path_buf(), record_path.to_path_buf()])
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use uuid::Uuid;

    use super::*;
    use crate::release::settings::{
        FreezeSettings, InstallerSettings, PackageSettings, SettingsBuilder,
    };

    fn settings(dist: PathBuf, out: &Path) -> Settings {
        SettingsBuilder::new()
            .package_settings(PackageSettings {
                product_name: "Gizmo Studio".to_string(),
                manufacturer: "Gizmo Works".to_string(),
                description: None,
                homepage: None,
            })
            .freeze_settings(FreezeSettings {
                command: "true".to_string(),
                args: vec![],
                dist_dir: dist,
            })
            .installer_settings(InstallerSettings {
                upgrade_code: Uuid::parse_str("7f98ef99-04d1-46bf-aab3-2dcf11bb4b26").unwrap(),
                ..InstallerSettings::default()
            })
            .output_dir(out)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn writes_document_and_record() {
        let tmp = TempDir::new().unwrap();
        let dist = tmp.path().join("dist");
        std::fs::create_dir(&dist).unwrap();
        std::fs::write(dist.join("app.exe"), b"binary").unwrap();
        let out = tmp.path().join("out");

        let settings = settings(dist, &out);
        let paths = run(&settings, "1.0.0").await.unwrap();

        assert_eq!(
            paths,
            vec![out.join("gizmo_studio.wxs"), out.join("component_guids.json")]
        );
        let document = std::fs::read_to_string(&paths[0]).unwrap();
        assert!(document.contains("Version=\"1.0.0\""));

        let record = IdentifierRecord::load(&paths[1]).unwrap();
        assert_eq!(record.len(), 1);
        assert!(record.get("app.exe").is_some());
    }

    #[tokio::test]
    async fn second_run_reuses_record() {
        let tmp = TempDir::new().unwrap();
        let dist = tmp.path().join("dist");
        std::fs::create_dir(&dist).unwrap();
        std::fs::write(dist.join("app.exe"), b"binary").unwrap();
        let out = tmp.path().join("out");
        let settings = settings(dist, &out);

        run(&settings, "1.0.0").await.unwrap();
        let first = std::fs::read_to_string(out.join("component_guids.json")).unwrap();
        run(&settings, "1.0.1").await.unwrap();
        let second = std::fs::read_to_string(out.join("component_guids.json")).unwrap();

        assert_eq!(first, second);
    }
}
