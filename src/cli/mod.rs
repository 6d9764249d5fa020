//! Command line interface for the release pipeline.
//!
//! This module wires argument parsing to the release pipeline and maps
//! outcomes onto process exit codes: 0 when every step completed, 1 when a
//! step failed, 2 for usage and configuration errors.

mod args;

pub use args::{Args, Command};

use std::path::{Path, PathBuf};

use crate::config;
use crate::error::{CliError, Result};
use crate::release::{FailureMode, Pipeline, PipelineReport, StepKind, StepOutcome};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    match args.command {
        Command::Release { version, lenient } => release(&args.config, version, lenient).await,
        Command::Manifest {
            folder,
            version,
            ids,
            output,
        } => manifest(&args.config, folder, version, ids, output).await,
        Command::Init => init(&args.config),
    }
}

/// Runs the full pipeline and prints a per-step summary.
async fn release(config_path: &Path, version: Option<String>, lenient: bool) -> Result<i32> {
    let mode = if lenient {
        FailureMode::Lenient
    } else {
        FailureMode::Strict
    };

    // In strict mode an absent version is a usage error, caught before any
    // work starts; lenient runs stamp a placeholder instead.
    if mode == FailureMode::Strict && version.as_deref().is_none_or(|v| v.trim().is_empty()) {
        return Err(CliError::MissingArgument {
            argument: "VERSION".to_string(),
        }
        .into());
    }

    let settings = config::load(config_path)?;
    let report = Pipeline::new(settings)
        .with_mode(mode)
        .run(version.as_deref())
        .await?;

    print_report(&report);
    Ok(if report.success() { 0 } else { 1 })
}

/// Generates the installer manifest without running the other steps.
async fn manifest(
    config_path: &Path,
    folder: PathBuf,
    version: String,
    ids: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<i32> {
    if version.trim().is_empty() {
        return Err(CliError::InvalidArguments {
            reason: "version must not be blank".to_string(),
        }
        .into());
    }

    let settings = config::load(config_path)?;
    let document_path = output.unwrap_or_else(|| settings.manifest_path());
    let record_path = ids.unwrap_or_else(|| settings.record_path());

    let paths = crate::release::generate_manifest_files(
        &settings,
        &folder,
        &version,
        &record_path,
        &document_path,
    )
    .await?;

    for path in &paths {
        println!("✓ Wrote {}", path.display());
    }
    Ok(0)
}

/// Writes a starter configuration file, refusing to overwrite one.
fn init(path: &Path) -> Result<i32> {
    if path.exists() {
        return Err(CliError::InvalidArguments {
            reason: format!("{} already exists; edit or remove it first", path.display()),
        }
        .into());
    }

    std::fs::write(path, config::starter_config())?;
    println!("✓ Wrote {}", path.display());
    println!("Edit the [package] and [freeze] tables, then run `frostpack release <version>`.");
    Ok(0)
}

fn print_report(report: &PipelineReport) {
    println!();
    println!("Release {} summary:", report.version);
    for step in &report.steps {
        let name = format!("{:<9}", step.kind.to_string());
        match &step.outcome {
            StepOutcome::Completed(artifact) => {
                let mut paths = artifact.paths.iter();
                match paths.next() {
                    Some(first) => println!("  ✓ {name} {}", first.display()),
                    None => println!("  ✓ {name}"),
                }
                for extra in paths {
                    println!("    {:<9} {}", "", extra.display());
                }
            }
            StepOutcome::Failed(e) => println!("  ✗ {name} {e}"),
        }
    }
    for kind in StepKind::ALL.iter().skip(report.steps.len()) {
        println!("  - {:<9} skipped", kind.to_string());
    }
}
