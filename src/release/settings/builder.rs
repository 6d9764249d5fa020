//! Builder for constructing Settings.

use super::{FreezeSettings, InstallerSettings, PackageSettings, Settings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building pipeline settings with validation.
/// Library users construct settings here directly; the CLI goes through
/// [`crate::config::load`], which fills the builder from `frostpack.toml`.
///
/// # Examples
///
/// ```no_run
/// use frostpack::release::{FreezeSettings, PackageSettings, SettingsBuilder};
///
/// # fn example() -> frostpack::release::Result<()> {
/// let settings = SettingsBuilder::new()
///     .package_settings(PackageSettings {
///         product_name: "Gizmo Studio".into(),
///         manufacturer: "Example Corp".into(),
///         ..Default::default()
///     })
///     .freeze_settings(FreezeSettings {
///         command: "pyinstaller".into(),
///         args: vec!["-y".into(), "gizmo.spec".into()],
///         dist_dir: "dist/gizmo".into(),
///     })
///     .output_dir("build")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    package_settings: Option<PackageSettings>,
    freeze_settings: FreezeSettings,
    installer_settings: InstallerSettings,
    output_dir: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets product metadata.
    ///
    /// # Required
    ///
    /// This field is required for building; the product name and
    /// manufacturer must be non-empty.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets freeze tool configuration.
    ///
    /// Default: empty [`FreezeSettings`] (the freeze step then fails with a
    /// configuration error, but manifest-only use does not need it).
    pub fn freeze_settings(mut self, settings: FreezeSettings) -> Self {
        self.freeze_settings = settings;
        self
    }

    /// Sets installer configuration.
    ///
    /// Default: [`InstallerSettings::default`] with a nil upgrade code.
    pub fn installer_settings(mut self, settings: InstallerSettings) -> Self {
        self.installer_settings = settings;
        self
    }

    /// Sets the directory build artifacts are written to.
    ///
    /// Default: current directory.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `package_settings` is missing or its product
    /// name/manufacturer is blank.
    pub fn build(self) -> crate::release::Result<Settings> {
        use crate::release::error::Context;

        let package = self
            .package_settings
            .context("package_settings is required")?;
        if package.product_name.trim().is_empty() {
            return Err(crate::release::Error::GenericError(
                "product_name must not be empty".to_string(),
            ));
        }
        if package.manufacturer.trim().is_empty() {
            return Err(crate::release::Error::GenericError(
                "manufacturer must not be empty".to_string(),
            ));
        }

        let output_dir = self.output_dir.unwrap_or_else(|| PathBuf::from("."));

        Ok(Settings::new(
            package,
            self.freeze_settings,
            self.installer_settings,
            output_dir,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_package_settings() {
        assert!(SettingsBuilder::new().build().is_err());
    }

    #[test]
    fn build_rejects_blank_names() {
        let err = SettingsBuilder::new()
            .package_settings(PackageSettings {
                product_name: "  ".into(),
                manufacturer: "Example Corp".into(),
                ..Default::default()
            })
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn output_dir_defaults_to_cwd() {
        let settings = SettingsBuilder::new()
            .package_settings(PackageSettings {
                product_name: "Gizmo".into(),
                manufacturer: "Example Corp".into(),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(settings.output_dir(), Path::new("."));
    }
}
