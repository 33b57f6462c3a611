//! Filesystem walking and filtering.
//!
//! Stage 1 of the catalog pipeline. Enumerates every file under the catalog
//! root and drops the ones that are not publications:
//!
//! ```text
//! publications/
//! ├── index.html                   # skipped: skip name
//! ├── shop_map.json                # skipped: companion file
//! ├── .DS_Store                    # skipped: hidden
//! ├── loose-notes.txt              # kept (category "Unsorted")
//! ├── books/
//! │   ├── My Great Novel.pdf       # kept
//! │   └── .git/                    # pruned: skip dir, at any depth
//! └── node_modules/                # pruned: skip dir
//! ```
//!
//! Directories are never returned. Hidden directories are still walked; only
//! hidden *files* are dropped. A symlink to a file is kept; a symlink to a
//! directory is not followed.
//!
//! Walk errors are fatal, and so is a symlink whose target cannot be stat'ed. A scan that silently loses a subtree would produce a
//! catalog that looks complete but isn't.

use crate::config::CatalogConfig;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read catalog root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Catalog root is not a directory: {0}")]
    RootNotDirectory(PathBuf),
    #[error("Cannot stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Check that `root` exists and is a directory, keeping the I/O cause.
fn check_root(root: &Path) -> Result<(), ScanError> {
    let metadata = fs::metadata(root).map_err(|source| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::RootNotDirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Collect the absolute paths of all catalogable files under `root`.
///
/// The result is sorted by path for stable processing, but callers must not
/// rely on it for catalog order; the serializer imposes its own sort.
pub fn scan(root: &Path, config: &CatalogConfig) -> Result<Vec<PathBuf>, ScanError> {
    check_root(root)?;

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_pruned_dir(e, config));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if is_excluded(relative, config) || is_linked_dir(&entry)? {
            continue;
        }
        files.push(entry.into_path());
    }

    files.sort();
    Ok(files)
}

// Directory links are not followed. A dangling link is a stat failure.
fn is_linked_dir(entry: &DirEntry) -> Result<bool, ScanError> {
    if !entry.file_type().is_symlink() {
        return Ok(false);
    }
    let target = fs::metadata(entry.path()).map_err(|source| ScanError::Stat {
        path: entry.path().to_path_buf(),
        source,
    })?;
    Ok(target.is_dir())
}

fn is_pruned_dir(entry: &DirEntry, config: &CatalogConfig) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && config.is_skipped_dir(&entry.file_name().to_string_lossy())
}

/// Whether a file, given by its path relative to the root, is left out.
///
/// A file is excluded if its name is hidden or on the skip list, or if any
/// directory component is a skip dir.
pub fn is_excluded(relative: &Path, config: &CatalogConfig) -> bool {
    let name = relative
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if name.starts_with('.') || config.is_skipped_name(&name) {
        return true;
    }

    relative
        .parent()
        .map(|dir| {
            dir.components().any(|c| match c {
                Component::Normal(part) => config.is_skipped_dir(&part.to_string_lossy()),
                _ => false,
            })
        })
        .unwrap_or(false)
}
