//! Core Settings struct and implementations.

use super::{FreezeSettings, InstallerSettings, PackageSettings};
use std::path::{Path, PathBuf};

/// Main settings for release pipeline operations.
///
/// Central configuration for the pipeline, constructed via
/// [`SettingsBuilder`] or loaded from `frostpack.toml` through
/// [`crate::config::load`]. Contains product metadata, freeze tool
/// configuration, and installer configuration.
///
/// # Examples
///
/// ```no_run
/// use frostpack::release::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> frostpack::release::Result<()> {
/// let settings = SettingsBuilder::new()
///     .package_settings(PackageSettings {
///         product_name: "Gizmo Studio".into(),
///         manufacturer: "Example Corp".into(),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`SettingsBuilder`] - Builder for constructing Settings
/// - [`PackageSettings`] - Product metadata
/// - [`InstallerSettings`] - Installer toolchain configuration
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product metadata.
    package: PackageSettings,

    /// Freeze tool configuration.
    freeze: FreezeSettings,

    /// Installer toolchain configuration.
    installer: InstallerSettings,

    /// Directory build artifacts land in.
    output_dir: PathBuf,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the artifact slug (`gizmo_studio` for "Gizmo Studio").
    pub fn slug(&self) -> String {
        self.package.slug()
    }

    /// Returns the product metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the freeze tool configuration.
    pub fn freeze(&self) -> &FreezeSettings {
        &self.freeze
    }

    /// Returns the installer configuration.
    pub fn installer(&self) -> &InstallerSettings {
        &self.installer
    }

    /// Returns the directory the freeze tool writes into.
    pub fn dist_dir(&self) -> &Path {
        &self.freeze.dist_dir
    }

    /// Returns the directory build artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the archive produced for `version`.
    pub fn archive_path(&self, version: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.zip", self.slug(), version))
    }

    /// Path the installer manifest document is written to.
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.wxs", self.slug()))
    }

    /// Path of the persisted identifier record.
    pub fn record_path(&self) -> PathBuf {
        self.output_dir.join("component_guids.json")
    }

    /// Path of the intermediate compiled manifest object.
    pub fn wixobj_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.wixobj", self.slug()))
    }

    /// Path of the final installer package for `version`.
    pub fn msi_path(&self, version: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.msi", self.slug(), version))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        freeze: FreezeSettings,
        installer: InstallerSettings,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            package,
            freeze,
            installer,
            output_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SettingsBuilder;
    use super::*;

    fn settings() -> Settings {
        SettingsBuilder::new()
            .package_settings(PackageSettings {
                product_name: "Gizmo Studio".into(),
                manufacturer: "Example Corp".into(),
                ..Default::default()
            })
            .output_dir("build")
            .build()
            .unwrap()
    }

    #[test]
    fn artifact_paths_use_slug_and_version() {
        let s = settings();
        assert_eq!(
            s.archive_path("1.2.3"),
            PathBuf::from("build/gizmo_studio_1.2.3.zip")
        );
        assert_eq!(s.manifest_path(), PathBuf::from("build/gizmo_studio.wxs"));
        assert_eq!(
            s.msi_path("1.2.3"),
            PathBuf::from("build/gizmo_studio_1.2.3.msi")
        );
        assert_eq!(s.record_path(), PathBuf::from("build/component_guids.json"));
    }
}
