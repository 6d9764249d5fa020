//! Release pipeline library for frozen desktop applications
//!
//! This library provides the core functionality for turning a frozen
//! application into a shippable Windows release:
//! - Freezing the application into a distributable folder
//! - Zipping the folder into a versioned archive
//! - Generating a WiX installer manifest with stable component GUIDs
//! - Compiling and linking the MSI installer
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod release;

// Re-export commonly used types
pub use error::{AppError, CliError, Result};
