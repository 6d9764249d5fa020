//! Archive step: zip the frozen application folder.
//!
//! Produces `{slug}_{version}.zip` in the output directory, containing the
//! distribution folder's contents at the archive root. Entries are written
//! in sorted path order with forward-slash names, so archiving the same
//! tree twice yields the same entry list.

use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;

use crate::release::error::{Error, ErrorExt, Result};
use crate::release::settings::Settings;
use crate::release::utils::fs;

/// Creates the release archive for the frozen build.
///
/// Zipping is synchronous work, so it runs on the blocking thread pool.
pub async fn run(settings: &Settings, version: &str) -> Result<Vec<PathBuf>> {
    let dist = settings.dist_dir().to_path_buf();
    let archive = settings.archive_path(version);
    log::info!(
        "Archiving {} -> {}",
        dist.display(),
        archive.display()
    );

    fs::ensure_parent(&archive).await?;

    let task_archive = archive.clone();
    tokio::task::spawn_blocking(move || write_zip(&dist, &task_archive))
        .await
        .map_err(|e| Error::GenericError(format!("archive task failed: {e}")))??;

    log::info!("✓ Created archive: {}", archive.display());
    Ok(vec![archive])
}

/// Writes a deflate-compressed zip of `src` to `dest`.
fn write_zip(src: &Path, dest: &Path) -> Result<()> {
    let file = std::fs::File::create(dest).fs_context("creating archive", dest)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(src).follow_links(false) {
        let entry =
            entry.map_err(|e| Error::GenericError(format!("walking {}: {e}", src.display())))?;
        if entry.path() != src {
            entries.push(entry);
        }
    }
    entries.sort_by_key(|e| e.path().to_path_buf());

    for entry in entries {
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::GenericError(format!("archive path outside root: {e}")))?;
        let name = entry_name(rel)?;

        if entry.file_type().is_dir() {
            writer.add_directory(&name, options)?;
        } else {
            writer.start_file(&name, options)?;
            let mut source =
                std::fs::File::open(entry.path()).fs_context("opening file", entry.path())?;
            std::io::copy(&mut source, &mut writer).fs_context("archiving file", entry.path())?;
        }
    }

    writer.finish()?;
    Ok(())
}

/// Forward-slash entry name for a path relative to the archive root.
fn entry_name(rel: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in rel.components() {
        if let std::path::Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| {
                Error::GenericError(format!("non UTF-8 file name in {}", rel.display()))
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use std::io::Read as _;

    use tempfile::TempDir;

    use super::*;
    use crate::release::settings::{FreezeSettings, PackageSettings, SettingsBuilder};

    fn sample_tree(tmp: &TempDir) -> PathBuf {
        let dist = tmp.path().join("dist");
        std::fs::create_dir(&dist).unwrap();
        std::fs::write(dist.join("app.exe"), b"binary").unwrap();
        std::fs::create_dir(dist.join("data")).unwrap();
        std::fs::write(dist.join("data/config.json"), b"{}").unwrap();
        dist
    }

    #[test]
    fn zip_contains_sorted_forward_slash_entries() {
        let tmp = TempDir::new().unwrap();
        let dist = sample_tree(&tmp);
        let dest = tmp.path().join("out.zip");

        write_zip(&dist, &dest).unwrap();

        let mut archive = zip::ZipArchive::new(std::fs::File::open(&dest).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["app.exe", "data/", "data/config.json"]);

        let mut content = String::new();
        archive
            .by_name("data/config.json")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "{}");
    }

    #[tokio::test]
    async fn run_names_archive_after_slug_and_version() {
        let tmp = TempDir::new().unwrap();
        let dist = sample_tree(&tmp);
        let out = tmp.path().join("out");

        let settings = SettingsBuilder::new()
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
            .output_dir(&out)
            .build()
            .unwrap();

        let paths = run(&settings, "1.2.3").await.unwrap();
        assert_eq!(paths, vec![out.join("gizmo_studio_1.2.3.zip")]);
        assert!(paths[0].is_file());
    }

    #[test]
    fn entry_name_joins_with_forward_slashes() {
        let rel = Path::new("data").join("nested").join("file.txt");
        assert_eq!(entry_name(&rel).unwrap(), "data/nested/file.txt");
    }
}
