//! Error types for release pipeline operations.
//!
//! All pipeline, manifest, and archive failures funnel into [`Error`]. The
//! variants mirror the failure taxonomy of the pipeline: bad inputs
//! (missing/empty folder, missing version), identifier-record corruption,
//! and external tool failures (spawn errors vs. non-zero exits).

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for release operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all release pipeline operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Catch-all with a preformatted message (see [`crate::bail!`]).
    #[error("{0}")]
    GenericError(String),

    /// IO errors without path context.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO errors annotated with the operation and path that failed.
    #[error("{context} ({path}): {source}")]
    Fs {
        /// What was being attempted.
        context: String,
        /// Path the operation failed on.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// An external tool could not be spawned at all.
    #[error("failed to launch {command}: {error}")]
    CommandFailed {
        /// Command that failed to start.
        command: String,
        /// Underlying spawn error.
        error: std::io::Error,
    },

    /// An external tool ran but exited with a non-zero status.
    #[error("{command} failed with {}", exit_code_display(.code))]
    ToolFailed {
        /// Command that failed.
        command: String,
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
    },

    /// A required external tool is not on PATH.
    #[error("required tool not found on PATH: {tool} ({hint})")]
    ToolNotFound {
        /// Tool binary name.
        tool: String,
        /// Installation hint shown to the user.
        hint: String,
    },

    /// Input folder does not exist or is not a directory.
    #[error("input folder does not exist or is not a directory: {0}")]
    MissingFolder(PathBuf),

    /// Input folder contains no files to package.
    #[error("input folder contains no files: {0}")]
    EmptyFolder(PathBuf),

    /// The version string is absent or blank.
    #[error("a non-empty version string is required")]
    MissingVersion,

    /// The identifier record assigns one GUID to more than one path.
    #[error("identifier record maps both {path} and {prior_path} to GUID {guid}")]
    DuplicateIdentifier {
        /// The colliding GUID.
        guid: String,
        /// Path assigned second.
        path: String,
        /// Path that already held the GUID.
        prior_path: String,
    },

    /// Identifier record file exists but is not valid JSON.
    #[error("identifier record {path} is not valid JSON: {source}")]
    RecordParse {
        /// Record file path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// JSON serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Archive creation errors.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Manifest template registration or rendering errors.
    #[error("template error: {0}")]
    Template(String),
}

fn exit_code_display(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by a signal?)".to_string(),
    }
}

/// Early-return with a [`Error::GenericError`] built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::release::Error::GenericError(format!($($arg)*)).into())
    };
}

/// Extension trait attaching operation/path context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] with the given context.
    fn fs_context(self, context: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Extension trait attaching a message to `Option` and `Result` values.
pub trait Context<T> {
    /// Converts `None`/`Err` into [`Error::GenericError`] with `msg`.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}
