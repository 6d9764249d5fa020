//! Artifact checksum calculation.
//!
//! Every completed pipeline step reports a SHA-256 checksum of its primary
//! artifact so releases can be verified after the fact. Steps may produce a
//! single file (archive, installer) or a directory tree (the frozen build),
//! so both are supported.

use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use crate::bail;
use crate::release::error::{Error, ErrorExt, Result};

/// Calculates the SHA-256 checksum of a file or directory.
///
/// Directories are hashed recursively in sorted path order, folding each
/// file's relative path into the digest, so the result is deterministic and
/// sensitive to renames.
///
/// # Arguments
///
/// * `path` - Path to the file or directory to hash
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the path cannot be read or is neither file nor directory
pub async fn artifact_sha256(path: &std::path::Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;

    if metadata.is_file() {
        file_sha256(path).await
    } else if metadata.is_dir() {
        directory_sha256(path).await
    } else {
        bail!("Path is neither file nor directory: {}", path.display())
    }
}

/// Hashes a single file, reading in 8KB chunks.
async fn file_sha256(file_path: &std::path::Path) -> Result<String> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening file for hashing", file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Hashes a directory tree.
///
/// Collects all files with walkdir, sorts paths, then hashes
/// `relative_path + content` for each so that layout changes alter the
/// digest even when file contents do not.
async fn directory_sha256(dir_path: &std::path::Path) -> Result<String> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir_path).follow_links(false) {
        let entry = entry.map_err(|e| {
            Error::GenericError(format!("walking {}: {e}", dir_path.display()))
        })?;
        if entry.file_type().is_file() {
            entries.push(entry);
        }
    }
    entries.sort_by_key(|e| e.path().to_path_buf());

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    for entry in entries {
        if let Ok(rel_path) = entry.path().strip_prefix(dir_path) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
        }

        let mut file = tokio::fs::File::open(entry.path())
            .await
            .fs_context("opening file for hashing", entry.path())?;

        loop {
            let n = file
                .read(&mut buffer)
                .await
                .fs_context("reading file for hash calculation", entry.path())?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}
