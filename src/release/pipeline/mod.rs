//! Release pipeline orchestration.
//!
//! Runs the four release steps (freeze, archive, manifest, installer) in
//! order and collects a typed [`PipelineReport`] describing what each
//! step produced or why it failed. The [`FailureMode`] decides what a step
//! failure means for the rest of the run:
//!
//! - [`FailureMode::Strict`] (the default) stops at the first failure, so a
//!   broken freeze never produces a stale installer.
//! - [`FailureMode::Lenient`] attempts every step regardless, which is
//!   useful when iterating on one stage with the others known-broken.
//!
//! In both modes the report, not a panic or a silent log line, is the source
//! of truth for what happened.

mod archive;
mod checksum;
mod freeze;
mod installer;
mod manifest;
mod tools;

pub use checksum::artifact_sha256;
pub use manifest::run_with as generate_manifest_files;

use std::fmt;
use std::path::PathBuf;

use crate::release::StepArtifact;
use crate::release::error::{Error, ErrorExt, Result};
use crate::release::settings::Settings;
use crate::release::utils::fs;

/// Version stamped on lenient runs that were started without one.
const PLACEHOLDER_VERSION: &str = "0.0.0";

/// The four release steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Run the freeze command to produce the distribution folder.
    Freeze,
    /// Zip the distribution folder.
    Archive,
    /// Generate the installer manifest and identifier record.
    Manifest,
    /// Compile and link the MSI.
    Installer,
}

impl StepKind {
    /// All steps in execution order.
    pub const ALL: [StepKind; 4] = [
        StepKind::Freeze,
        StepKind::Archive,
        StepKind::Manifest,
        StepKind::Installer,
    ];
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Freeze => "freeze",
            StepKind::Archive => "archive",
            StepKind::Manifest => "manifest",
            StepKind::Installer => "installer",
        };
        write!(f, "{name}")
    }
}

/// What a single step ended as.
#[derive(Debug)]
pub enum StepOutcome {
    /// The step ran to completion and produced these artifacts.
    Completed(StepArtifact),
    /// The step failed with this error.
    Failed(Error),
}

/// One step's entry in the pipeline report.
#[derive(Debug)]
pub struct StepReport {
    /// Which step this describes.
    pub kind: StepKind,
    /// How it ended.
    pub outcome: StepOutcome,
}

impl StepReport {
    /// True when the step completed.
    pub fn completed(&self) -> bool {
        matches!(self.outcome, StepOutcome::Completed(_))
    }
}

/// Outcome of a whole pipeline run.
///
/// Contains an entry for every step that was attempted; in strict mode
/// steps after the first failure are absent because they never ran.
#[derive(Debug)]
pub struct PipelineReport {
    /// Version the release was stamped with.
    pub version: String,
    /// Attempted steps, in execution order.
    pub steps: Vec<StepReport>,
}

impl PipelineReport {
    /// True when every attempted step completed and none were skipped.
    pub fn success(&self) -> bool {
        self.steps.len() == StepKind::ALL.len() && self.steps.iter().all(StepReport::completed)
    }

    /// The steps that failed, in execution order.
    pub fn failed(&self) -> Vec<&StepReport> {
        self.steps.iter().filter(|s| !s.completed()).collect()
    }
}

/// How the pipeline reacts to a step failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Stop at the first failed step. The default.
    #[default]
    Strict,
    /// Attempt every step and report all failures at the end.
    Lenient,
}

/// Drives a release from frozen build to installer.
///
/// # Examples
///
/// ```no_run
/// use frostpack::release::{FailureMode, Pipeline};
/// # use frostpack::release::Settings;
///
/// # async fn example(settings: Settings) -> frostpack::release::Result<()> {
/// let report = Pipeline::new(settings)
///     .with_mode(FailureMode::Lenient)
///     .run(Some("1.2.3"))
///     .await?;
/// if !report.success() {
///     for step in report.failed() {
///         eprintln!("step {} failed", step.kind);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    settings: Settings,
    mode: FailureMode,
}

impl Pipeline {
    /// Creates a pipeline running in [`FailureMode::Strict`].
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            mode: FailureMode::Strict,
        }
    }

    /// Sets the failure mode.
    pub fn with_mode(mut self, mode: FailureMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the pipeline settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the release.
    ///
    /// Fails outright only on pre-step problems: a missing version in
    /// strict mode, an absent toolchain in strict mode, or an unusable
    /// output directory. Step failures land in the returned report.
    pub async fn run(&self, version: Option<&str>) -> Result<PipelineReport> {
        let version = self.resolve_version(version)?;
        if semver::Version::parse(&version).is_err() {
            log::warn!("version {version:?} is not a semantic version; continuing anyway");
        }

        log::info!(
            "Releasing {} v{} ({} steps)",
            self.settings.product_name(),
            version,
            StepKind::ALL.len()
        );
        fs::ensure_dir(self.settings.output_dir()).await?;

        match self.mode {
            FailureMode::Strict => tools::preflight(&self.settings)?,
            FailureMode::Lenient => {
                if let Err(e) = tools::preflight(&self.settings) {
                    log::warn!("toolchain check failed, continuing anyway: {e}");
                }
            }
        }

        let mut steps = Vec::new();
        for kind in StepKind::ALL {
            let result = match kind {
                StepKind::Freeze => freeze::run(&self.settings).await,
                StepKind::Archive => archive::run(&self.settings, &version).await,
                StepKind::Manifest => manifest::run(&self.settings, &version).await,
                StepKind::Installer => installer::run(&self.settings, &version).await,
            };

            // A step whose outputs cannot be described counts as failed
            // too; an artifact we cannot stat is not an artifact.
            let outcome = match result {
                Ok(paths) => match describe_artifact(paths).await {
                    Ok(artifact) => StepOutcome::Completed(artifact),
                    Err(e) => StepOutcome::Failed(e),
                },
                Err(e) => StepOutcome::Failed(e),
            };

            let failed = matches!(outcome, StepOutcome::Failed(_));
            if let StepOutcome::Failed(e) = &outcome {
                log::error!("{kind} step failed: {e}");
            }
            steps.push(StepReport { kind, outcome });
            if failed && self.mode == FailureMode::Strict {
                break;
            }
        }

        let report = PipelineReport { version, steps };
        if report.success() {
            log::info!("✓ Release {} complete", report.version);
        } else {
            let failed = report.failed().len();
            let skipped = StepKind::ALL.len() - report.steps.len();
            if skipped > 0 {
                log::error!("release failed: {failed} step(s) failed, {skipped} skipped");
            } else {
                log::error!(
                    "release failed: {failed} of {} steps failed",
                    StepKind::ALL.len()
                );
            }
        }
        Ok(report)
    }

    fn resolve_version(&self, version: Option<&str>) -> Result<String> {
        match version {
            Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
            _ => match self.mode {
                FailureMode::Strict => Err(Error::MissingVersion),
                FailureMode::Lenient => {
                    log::error!(
                        "no version provided; stamping release as {PLACEHOLDER_VERSION}"
                    );
                    Ok(PLACEHOLDER_VERSION.to_string())
                }
            },
        }
    }
}

/// Computes size and checksum metadata for a completed step's paths.
async fn describe_artifact(paths: Vec<PathBuf>) -> Result<StepArtifact> {
    let mut size = 0u64;
    for path in &paths {
        size += path_size(path).await?;
    }

    let checksum = match paths.first() {
        Some(first) => artifact_sha256(first).await?,
        None => String::new(),
    };

    Ok(StepArtifact {
        paths,
        size,
        checksum,
    })
}

/// Total size of a file, or of all files under a directory.
async fn path_size(path: &std::path::Path) -> Result<u64> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;
    if metadata.is_file() {
        return Ok(metadata.len());
    }

    let mut total = 0u64;
    for entry in walkdir::WalkDir::new(path).follow_links(false) {
        let entry =
            entry.map_err(|e| Error::GenericError(format!("walking {}: {e}", path.display())))?;
        if entry.file_type().is_file() {
            let meta = entry
                .metadata()
                .map_err(|e| Error::GenericError(format!("walking {}: {e}", path.display())))?;
            total += meta.len();
        }
    }
    Ok(total)
}
