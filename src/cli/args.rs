//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with the
//! configuration file path shared across all subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Release pipeline for frozen desktop applications
#[derive(Parser, Debug)]
#[command(
    name = "frostpack",
    version,
    about = "Freeze, archive, and build a Windows installer for a desktop application",
    long_about = "Runs the release pipeline for a frozen desktop application: freeze the
application into a distributable folder, zip it, generate a WiX installer
manifest with stable component GUIDs, and compile the MSI.

Usage:
  frostpack release 1.2.3
  frostpack release 1.2.3 --lenient
  frostpack manifest --folder dist/app --version 1.2.3
  frostpack init

Exit code 0 = every step completed; 1 = a step failed; 2 = usage or
configuration error."
)]
pub struct Args {
    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "FROSTPACK_CONFIG",
        value_name = "PATH",
        default_value = crate::config::DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full release pipeline: freeze, archive, manifest, installer
    Release {
        /// Version to stamp on the release (e.g. 1.2.3)
        #[arg(value_name = "VERSION")]
        version: Option<String>,

        /// Attempt every step even after failures and report them all
        #[arg(long)]
        lenient: bool,
    },

    /// Generate the installer manifest for a folder without running the
    /// full pipeline
    Manifest {
        /// Folder whose contents the manifest should describe
        #[arg(short, long, value_name = "DIR")]
        folder: PathBuf,

        /// Version to stamp into the manifest
        #[arg(long, value_name = "VERSION")]
        version: String,

        /// Identifier record to read and update [default: from configuration]
        #[arg(long, value_name = "PATH")]
        ids: Option<PathBuf>,

        /// Where to write the manifest document [default: from configuration]
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write a starter configuration file with a fresh upgrade code
    Init,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
