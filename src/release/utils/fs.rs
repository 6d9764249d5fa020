//! File system utilities for the release pipeline.
//!
//! Small, idempotent helpers with path-annotated errors. Heavier directory
//! work (harvesting, zipping) lives in the modules that own it.

use crate::release::error::{ErrorExt, Result};
use std::path::Path;
use tokio::fs;

/// Creates the directory and all parents. Idempotent.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Creates the parent directory of `path`, if it has one. Idempotent.
pub async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating parent directory", parent)?;
    }
    Ok(())
}

/// Returns true if the directory exists and contains at least one entry.
///
/// A missing path or a plain file both count as "not a populated directory";
/// callers decide whether that is an error.
pub async fn dir_is_populated(path: &Path) -> Result<bool> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Ok(false),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e).fs_context("reading metadata", path),
    }

    let mut entries = fs::read_dir(path)
        .await
        .fs_context("reading directory", path)?;
    let first = entries
        .next_entry()
        .await
        .fs_context("reading directory", path)?;
    Ok(first.is_some())
}

/// Writes UTF-8 text, creating parent directories as needed. Sync so that
/// callers without a runtime (the record persistence API) can use it too.
pub fn write_text_sync(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).fs_context("creating parent directory", parent)?;
    }
    std::fs::write(path, content).fs_context("writing file", path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn dir_is_populated_distinguishes_cases() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("empty");
        tokio::fs::create_dir(&empty).await.unwrap();
        assert!(!dir_is_populated(&empty).await.unwrap());
        assert!(!dir_is_populated(&tmp.path().join("missing")).await.unwrap());

        tokio::fs::write(empty.join("a.txt"), b"x").await.unwrap();
        assert!(dir_is_populated(&empty).await.unwrap());

        let file = tmp.path().join("plain.txt");
        tokio::fs::write(&file, b"x").await.unwrap();
        assert!(!dir_is_populated(&file).await.unwrap());
    }

    #[test]
    fn write_text_sync_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b/c.txt");
        write_text_sync(&nested, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(nested).unwrap(), "hello");
    }
}
