//! Freeze tool configuration.

use std::path::PathBuf;

/// Configuration for the external freeze tool.
///
/// The freeze step turns a script/application into a standalone executable
/// tree. The tool itself is a black box: frostpack runs the configured
/// command and afterwards consumes whatever landed in [`dist_dir`].
///
/// # Configuration
///
/// ```toml
/// [freeze]
/// command = "pyinstaller"
/// args = ["-y", "--clean", "gizmo.spec"]
/// dist_dir = "dist/gizmo"
/// ```
///
/// [`dist_dir`]: FreezeSettings::dist_dir
#[derive(Debug, Clone, Default)]
pub struct FreezeSettings {
    /// Freeze tool binary name or path.
    pub command: String,

    /// Arguments passed to the freeze tool verbatim.
    pub args: Vec<String>,

    /// Directory the freeze tool writes its output tree into.
    ///
    /// Doubles as the default `--folder` for manifest generation.
    pub dist_dir: PathBuf,
}
