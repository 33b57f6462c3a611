//! Shared test utilities for the pubcat test suite.
//!
//! Tests build small publication trees in a `TempDir` and look items up by
//! relative path.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_file(tmp.path(), "books/My Great Novel.pdf", "pdf bytes");
//! let catalog = build_catalog(tmp.path(), &CatalogConfig::default()).unwrap();
//! let novel = find_item(&catalog, "books/My Great Novel.pdf");
//! ```

use std::path::{Path, PathBuf};

use crate::types::{Catalog, CatalogItem};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `contents` to `root/rel`, creating parent directories. Returns the
/// absolute path.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

// =========================================================================
// Catalog lookups — panics with a clear message on miss
// =========================================================================

/// Find an item by relative path. Panics if not found.
pub fn find_item<'a>(catalog: &'a Catalog, rel: &str) -> &'a CatalogItem {
    catalog
        .items
        .iter()
        .find(|i| i.relative_path == rel)
        .unwrap_or_else(|| {
            let paths = item_paths(catalog);
            panic!("item '{rel}' not found. Available: {paths:?}")
        })
}

/// All relative paths in catalog order.
pub fn item_paths(catalog: &Catalog) -> Vec<&str> {
    catalog
        .items
        .iter()
        .map(|i| i.relative_path.as_str())
        .collect()
}
