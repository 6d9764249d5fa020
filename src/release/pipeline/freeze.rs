//! Freeze step: produce the distributable application folder.
//!
//! Runs the configured freeze command (typically a bundling tool that turns
//! the application into a self-contained folder) and validates that it left
//! a populated distribution directory behind. The command's own stdout and
//! stderr pass straight through to the terminal.

use std::path::PathBuf;

use crate::release::error::{Error, ErrorExt, Result};
use crate::release::settings::Settings;
use crate::release::utils::fs;

/// Runs the freeze command and returns the distribution directory it
/// produced.
///
/// # Errors
///
/// * [`Error::CommandFailed`] when the command cannot be spawned
/// * [`Error::ToolFailed`] when it exits non-zero
/// * [`Error::MissingFolder`] / [`Error::EmptyFolder`] when the configured
///   distribution directory is absent or empty afterwards; a zero exit
///   status alone is not trusted
pub async fn run(settings: &Settings) -> Result<Vec<PathBuf>> {
    let freeze = settings.freeze();
    log::info!(
        "Freezing application: {} {}",
        freeze.command,
        freeze.args.join(" ")
    );

    let status = tokio::process::Command::new(&freeze.command)
        .args(&freeze.args)
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: freeze.command.clone(),
            error: e,
        })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            command: freeze.command.clone(),
            code: status.code(),
        });
    }

    // The exit status alone is not proof of output; check the folder.
    let dist = settings.dist_dir().to_path_buf();
    match tokio::fs::metadata(&dist).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(Error::MissingFolder(dist)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingFolder(dist));
        }
        Err(e) => return Err(e).fs_context("reading distribution directory", &dist),
    }
    if !fs::dir_is_populated(&dist).await? {
        return Err(Error::EmptyFolder(dist));
    }

    log::info!("✓ Frozen build at {}", dist.display());
    Ok(vec![dist])
}
