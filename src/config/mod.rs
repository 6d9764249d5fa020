//! `frostpack.toml` loading and validation.
//!
//! The configuration file is the only input besides the version string.
//! Tables map one-to-one onto the release settings: `[package]` and
//! `[freeze]` are required, `[installer]` must at least carry the upgrade
//! code, `[output]` is optional. Unknown keys are rejected rather than
//! silently ignored, so typos surface as errors.
//!
//! Relative paths (`dist_dir`, `output.dir`, `icon`) resolve against the
//! process working directory, matching how the freeze command itself runs.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{CliError, Result};
use crate::release::{
    FreezeSettings, InstallerSettings, PackageSettings, ProgramFilesFolder, Settings,
    SettingsBuilder,
};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "frostpack.toml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    package: PackageTable,
    freeze: FreezeTable,
    installer: InstallerTable,
    #[serde(default)]
    output: OutputTable,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageTable {
    product_name: String,
    manufacturer: String,
    description: Option<String>,
    homepage: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FreezeTable {
    command: String,
    #[serde(default)]
    args: Vec<String>,
    dist_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InstallerTable {
    upgrade_code: String,
    install_dir_name: Option<String>,
    ui_ref: Option<String>,
    light_extension: Option<String>,
    program_files: Option<String>,
    icon: Option<PathBuf>,
    start_menu_shortcut: Option<String>,
    compiler: Option<String>,
    linker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputTable {
    dir: Option<PathBuf>,
}

/// Loads and validates settings from a configuration file.
///
/// # Errors
///
/// An unreadable file or a value that fails validation (bad upgrade code,
/// blank product name) is a [`CliError::Config`]; malformed TOML surfaces
/// as a TOML error. All of them exit with the usage status code.
pub fn load(path: &Path) -> Result<Settings> {
    let raw = std::fs::read_to_string(path).map_err(|e| CliError::Config {
        reason: format!("cannot read {}: {e}", path.display()),
    })?;
    let config: ConfigFile = toml::from_str(&raw)?;
    log::debug!("Loaded configuration from {}", path.display());
    build_settings(config)
}

fn build_settings(config: ConfigFile) -> Result<Settings> {
    let package = PackageSettings {
        product_name: config.package.product_name,
        manufacturer: config.package.manufacturer,
        description: config.package.description,
        homepage: config.package.homepage,
    };

    let freeze = FreezeSettings {
        command: config.freeze.command,
        args: config.freeze.args,
        dist_dir: config.freeze.dist_dir,
    };

    let defaults = InstallerSettings::default();
    let installer = InstallerSettings {
        upgrade_code: parse_upgrade_code(&config.installer.upgrade_code)?,
        install_dir_name: config.installer.install_dir_name,
        ui_ref: config.installer.ui_ref.unwrap_or(defaults.ui_ref),
        light_extension: config
            .installer
            .light_extension
            .unwrap_or(defaults.light_extension),
        program_files: parse_program_files(config.installer.program_files.as_deref())?,
        icon: config.installer.icon,
        start_menu_shortcut: config.installer.start_menu_shortcut,
        compiler: config.installer.compiler.unwrap_or(defaults.compiler),
        linker: config.installer.linker.unwrap_or(defaults.linker),
    };

    let mut builder = SettingsBuilder::new()
        .package_settings(package)
        .freeze_settings(freeze)
        .installer_settings(installer);
    if let Some(dir) = config.output.dir {
        builder = builder.output_dir(dir);
    }

    builder.build().map_err(|e| {
        CliError::Config {
            reason: e.to_string(),
        }
        .into()
    })
}

fn parse_upgrade_code(raw: &str) -> Result<Uuid> {
    let uuid = Uuid::parse_str(raw).map_err(|e| CliError::Config {
        reason: format!("invalid upgrade_code {raw:?}: {e}"),
    })?;
    if uuid.is_nil() {
        return Err(CliError::Config {
            reason: "upgrade_code must not be the nil GUID".to_string(),
        }
        .into());
    }
    Ok(uuid)
}

fn parse_program_files(raw: Option<&str>) -> Result<ProgramFilesFolder> {
    match raw {
        None | Some("64") => Ok(ProgramFilesFolder::X64),
        Some("32") => Ok(ProgramFilesFolder::X86),
        Some(other) => Err(CliError::Config {
            reason: format!("program_files must be \"64\" or \"32\", got {other:?}"),
        }
        .into()),
    }
}

/// Returns a commented starter configuration with a freshly minted upgrade
/// code, ready to be written as `frostpack.toml`.
pub fn starter_config() -> String {
    let upgrade_code = Uuid::new_v4().to_string().to_uppercase();
    format!(
        r#"# frostpack release configuration

[package]
product_name = "My Application"
manufacturer = "My Company"
# description = "Longer text shown in the installed-programs list"
# homepage = "https://example.com"

[freeze]
command = "pyinstaller"
args = ["app.spec"]
dist_dir = "dist/app"

[installer]
# Generated for this project. Keep it stable for the lifetime of the
# product; Windows uses it to recognize upgrades.
upgrade_code = "{upgrade_code}"
# install_dir_name = "My Application"
# start_menu_shortcut = "app.exe"
# icon = "assets/app.ico"
# program_files = "64"

[output]
dir = "deploy"
"#
    )
}
