//! Installer toolchain configuration.

use std::path::PathBuf;
use uuid::Uuid;

/// Program Files variant the application installs under.
///
/// Determines the root directory reference in the manifest and whether
/// components are marked 64-bit.
///
/// # Configuration
///
/// ```toml
/// [installer]
/// program_files = "64"   # or "32"
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ProgramFilesFolder {
    /// 64-bit `Program Files` (default).
    #[default]
    X64,

    /// 32-bit `Program Files (x86)`.
    X86,
}

impl ProgramFilesFolder {
    /// Installer directory identifier for this variant.
    pub fn directory_id(self) -> &'static str {
        match self {
            ProgramFilesFolder::X64 => "ProgramFiles64Folder",
            ProgramFilesFolder::X86 => "ProgramFilesFolder",
        }
    }

    /// `Package` element `Platform` value for this variant.
    ///
    /// Must agree with [`Self::win64`]: the linker rejects 64-bit
    /// components in a package whose platform summary stays x86.
    pub fn platform(self) -> &'static str {
        match self {
            ProgramFilesFolder::X64 => "x64",
            ProgramFilesFolder::X86 => "x86",
        }
    }

    /// Whether components under this root are marked 64-bit.
    pub fn win64(self) -> bool {
        matches!(self, ProgramFilesFolder::X64)
    }
}

/// MSI installer configuration.
///
/// Covers the upgrade identity, install location, UI wiring, and the names
/// of the WiX-style compiler/linker binaries to invoke.
///
/// # Configuration
///
/// ```toml
/// [installer]
/// upgrade_code = "6B5C36E8-58D7-4F34-A9B4-2E2A5C3E21F0"
/// install_dir_name = "Gizmo Studio"
/// ui_ref = "WixUI_InstallDir"
/// light_extension = "WixUIExtension"
/// icon = "assets/gizmo.ico"
/// start_menu_shortcut = "gizmo.exe"
/// ```
#[derive(Debug, Clone)]
pub struct InstallerSettings {
    /// Upgrade code GUID identifying the product family.
    ///
    /// Must never change across releases of the same product; it is what
    /// lets the installer detect and replace older versions. Also serves
    /// as the namespace for minting stable component GUIDs.
    pub upgrade_code: Uuid,

    /// Folder name under Program Files.
    ///
    /// Default: the product name.
    pub install_dir_name: Option<String>,

    /// Installer UI dialog set referenced from the manifest.
    ///
    /// Default: `WixUI_InstallDir`
    pub ui_ref: String,

    /// Extension passed to the linker (`light -ext <extension>`).
    ///
    /// Default: `WixUIExtension`
    pub light_extension: String,

    /// Program Files variant to install under.
    ///
    /// Default: [`ProgramFilesFolder::X64`]
    pub program_files: ProgramFilesFolder,

    /// Icon shown in Add/Remove Programs (`.ico` file).
    ///
    /// Default: None
    pub icon: Option<PathBuf>,

    /// File name inside the install dir to point a Start Menu shortcut at
    /// (e.g. `gizmo.exe`). No shortcut is created when absent.
    ///
    /// Default: None
    pub start_menu_shortcut: Option<String>,

    /// Manifest compiler binary name.
    ///
    /// Default: `candle`
    pub compiler: String,

    /// Manifest linker binary name.
    ///
    /// Default: `light`
    pub linker: String,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            upgrade_code: Uuid::nil(),
            install_dir_name: None,
            ui_ref: "WixUI_InstallDir".to_string(),
            light_extension: "WixUIExtension".to_string(),
            program_files: ProgramFilesFolder::default(),
            icon: None,
            start_menu_shortcut: None,
            compiler: "candle".to_string(),
            linker: "light".to_string(),
        }
    }
}
