//! Frozen-tree harvesting.
//!
//! Builds an in-memory model of the freeze tool's output directory: every
//! file and subdirectory, verbatim, in sorted order so downstream id
//! assignment and document rendering are deterministic.

use crate::release::error::{Error, ErrorExt, Result};
use crate::release::wix::ids::normalize_rel_path;
use std::path::{Path, PathBuf};

/// A file discovered under the frozen tree.
#[derive(Debug, Clone)]
pub struct HarvestedFile {
    /// File name (last path component).
    pub name: String,

    /// Normalized path relative to the harvest root (`sub/b.txt`).
    pub rel_path: String,

    /// Full path on disk, used as the manifest `Source`.
    pub source: PathBuf,

    /// File size in bytes.
    pub size: u64,
}

/// A directory discovered under the frozen tree, with its children.
#[derive(Debug, Clone)]
pub struct HarvestedDir {
    /// Directory name; empty for the harvest root.
    pub name: String,

    /// Normalized path relative to the harvest root; empty for the root.
    pub rel_path: String,

    /// Subdirectories, sorted by name.
    pub dirs: Vec<HarvestedDir>,

    /// Files, sorted by name.
    pub files: Vec<HarvestedFile>,
}

impl HarvestedDir {
    /// Total number of files in this subtree.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.dirs.iter().map(HarvestedDir::file_count).sum::<usize>()
    }

    /// Total number of directories in this subtree, excluding the root.
    pub fn dir_count(&self) -> usize {
        self.dirs.len() + self.dirs.iter().map(HarvestedDir::dir_count).sum::<usize>()
    }

    /// Total size of all files in this subtree, in bytes.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum::<u64>()
            + self.dirs.iter().map(HarvestedDir::total_size).sum::<u64>()
    }
}

/// Walks `root` into a [`HarvestedDir`] tree.
///
/// The tree is taken verbatim: nothing is filtered or rewritten. Entries
/// are sorted bytewise by name at every level.
///
/// # Errors
///
/// - [`Error::MissingFolder`] when `root` does not exist or is not a
///   directory.
/// - [`Error::EmptyFolder`] when the tree contains no files at all (a
///   freeze that produced nothing is a configuration error, and an empty
///   manifest would install nothing).
pub fn harvest(root: &Path) -> Result<HarvestedDir> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(Error::MissingFolder(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingFolder(root.to_path_buf()));
        }
        Err(e) => return Err(e).fs_context("reading folder metadata", root),
    }

    let tree = walk_dir(root, Path::new(""))?;
    if tree.file_count() == 0 {
        return Err(Error::EmptyFolder(root.to_path_buf()));
    }
    Ok(tree)
}

fn walk_dir(abs: &Path, rel: &Path) -> Result<HarvestedDir> {
    let mut names: Vec<(String, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(abs).fs_context("reading directory", abs)? {
        let entry = entry.fs_context("reading directory entry", abs)?;
        let path = entry.path();
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => {
                return Err(Error::GenericError(format!(
                    "file name is not valid UTF-8: {}",
                    path.display()
                )));
            }
        };
        names.push((name, path));
    }
    names.sort_by(|a, b| a.0.cmp(&b.0));

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for (name, path) in names {
        let child_rel = rel.join(&name);
        let meta = std::fs::symlink_metadata(&path).fs_context("reading metadata", &path)?;
        if meta.is_dir() {
            dirs.push(walk_dir(&path, &child_rel)?);
        } else {
            files.push(HarvestedFile {
                name,
                rel_path: normalize_rel_path(&child_rel),
                source: path,
                size: meta.len(),
            });
        }
    }

    Ok(HarvestedDir {
        name: rel
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        rel_path: normalize_rel_path(rel),
        dirs,
        files,
    })
}
