//! Application-level error types.
//!
//! Errors are split in two layers: [`AppError`] wraps everything the binary
//! can hit (configuration, IO, the release pipeline), while
//! [`crate::release::Error`] covers the pipeline's own domain. The CLI maps
//! the layers onto exit codes via [`AppError::exit_code`].

use thiserror::Error;

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for the frostpack binary
#[derive(Error, Debug)]
pub enum AppError {
    /// CLI argument and configuration errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Release pipeline errors
    #[error("release error: {0}")]
    Release(#[from] crate::release::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Configuration file problems
    #[error("Configuration error: {reason}")]
    Config {
        /// Reason for the error
        reason: String,
    },
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// Usage and configuration problems exit with 2, matching how argument
    /// parsing itself exits; everything else is a runtime failure and exits
    /// with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Cli(_) | AppError::Toml(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_two() {
        let err = AppError::from(CliError::MissingArgument {
            argument: "VERSION".to_string(),
        });
        assert_eq!(err.exit_code(), 2);

        let err = AppError::from(crate::release::Error::MissingVersion);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn release_errors_keep_their_message() {
        let err = AppError::from(crate::release::Error::MissingVersion);
        assert!(err.to_string().contains("version"));
    }
}
