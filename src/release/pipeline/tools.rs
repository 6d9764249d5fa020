//! External tool detection.
//!
//! The pipeline shells out to the configured freeze command and to the
//! manifest compiler and linker (`candle` and `light` by default). All of
//! them are located up front so a missing toolchain fails the run before
//! any slow work happens, with an installation hint instead of a raw spawn
//! error.

use std::path::PathBuf;

use crate::release::error::{Error, Result};
use crate::release::settings::Settings;

const TOOLSET_HINT: &str = "install the WiX Toolset and add its bin directory to PATH";
const FREEZE_HINT: &str = "check the [freeze] command in your configuration";

/// Locates an installer toolchain binary on PATH.
pub fn locate_toolset(tool: &str) -> Result<PathBuf> {
    locate(tool, TOOLSET_HINT)
}

/// Locates the configured freeze command on PATH.
pub fn locate_freeze(command: &str) -> Result<PathBuf> {
    locate(command, FREEZE_HINT)
}

/// Checks that every external tool the pipeline will invoke is present.
///
/// Returns the first missing tool; strict runs abort on it, lenient runs
/// log it and let the affected steps fail individually.
pub fn preflight(settings: &Settings) -> Result<()> {
    locate_freeze(&settings.freeze().command)?;
    locate_toolset(&settings.installer().compiler)?;
    locate_toolset(&settings.installer().linker)?;
    Ok(())
}

fn locate(tool: &str, hint: &str) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{tool} not found in PATH: {e}");
            Err(Error::ToolNotFound {
                tool: tool.to_string(),
                hint: hint.to_string(),
            })
        }
    }
}
