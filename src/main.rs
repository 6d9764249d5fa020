//! Frostpack - release pipeline for frozen desktop applications.
//!
//! This binary freezes an application into a distributable folder, zips it,
//! generates a WiX installer manifest with stable component GUIDs, and
//! compiles the MSI installer.

use std::process;

use env_logger::Env;

use frostpack::cli;

#[tokio::main]
async fn main() {
    // Pipeline progress is reported through the logger; show it by default.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
