//! Installer step: compile and link the MSI.
//!
//! Two-stage toolchain invocation: the manifest compiler (`candle`) turns
//! the `.wxs` document into a `.wixobj`, then the linker (`light`) produces
//! the final `.msi` with the configured UI extension. Tool output passes
//! straight through to the terminal.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::bail;
use crate::release::error::{Error, Result};
use crate::release::pipeline::tools;
use crate::release::settings::Settings;
use crate::release::utils::fs;

/// Builds the MSI installer from the previously generated manifest.
///
/// # Errors
///
/// * [`Error::ToolNotFound`] when the compiler or linker is not on PATH
/// * [`Error::ToolFailed`] when either stage exits non-zero
/// * A generic error when the linker reports success but the MSI is
///   missing afterwards; exit codes alone are not trusted
pub async fn run(settings: &Settings, version: &str) -> Result<Vec<PathBuf>> {
    let installer = settings.installer();
    let manifest = settings.manifest_path();
    let wixobj = settings.wixobj_path();
    let msi = settings.msi_path(version);

    let compiler = tools::locate_toolset(&installer.compiler)?;
    let linker = tools::locate_toolset(&installer.linker)?;

    fs::ensure_parent(&msi).await?;

    log::info!("Compiling installer manifest with {}", installer.compiler);
    run_tool(
        &compiler,
        &installer.compiler,
        vec![
            OsString::from("-out"),
            wixobj.clone().into_os_string(),
            manifest.into_os_string(),
        ],
    )
    .await?;

    log::info!("Linking installer with {}", installer.linker);
    run_tool(
        &linker,
        &installer.linker,
        vec![
            OsString::from("-ext"),
            OsString::from(&installer.light_extension),
            OsString::from("-out"),
            msi.clone().into_os_string(),
            wixobj.into_os_string(),
        ],
    )
    .await?;

    if tokio::fs::metadata(&msi).await.is_err() {
        bail!(
            "{} reported success but {} was not created",
            installer.linker,
            msi.display()
        );
    }

    log::info!("✓ Created installer: {}", msi.display());
    Ok(vec![msi])
}

/// Spawns one toolchain stage and checks its exit status.
async fn run_tool(program: &Path, display_name: &str, args: Vec<OsString>) -> Result<()> {
    let status = tokio::process::Command::new(program)
        .args(&args)
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: display_name.to_string(),
            error: e,
        })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            command: display_name.to_string(),
            code: status.code(),
        });
    }
    Ok(())
}
