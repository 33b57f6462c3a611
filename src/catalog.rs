//! Catalog assembly and serialization.
//!
//! Stage 3 of the pipeline: collect the classified items into a [`Catalog`],
//! sort them, and write `publications.json`.
//!
//! ## Ordering
//!
//! Items sort ascending and case-insensitively on
//! `(category, visibility, title, relative_path)`. Visibility compares as its
//! string form, so within a category `"paid"` lands before `"public"`. Existing
//! consumers depend on this order, so it stays even though it falls out of
//! string comparison rather than a business rule. A last case-sensitive key on
//! `relative_path` keeps output byte-stable when two paths differ only in case.
//!
//! ## Writing
//!
//! The document is serialized in full before anything touches disk, staged in
//! a temp file next to the target, and renamed over it. A failed run leaves
//! the previous catalog untouched.

use crate::classify::{ClassifyError, Classifier, utc_iso};
use crate::config::CatalogConfig;
use crate::scan::{self, ScanError};
use crate::shop_map::ShopMap;
use crate::types::{Catalog, CatalogItem, Visibility};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Classify error: {0}")]
    Classify(#[from] ClassifyError),
    #[error("Cannot stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cannot write catalog to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a `generate` run.
#[derive(Debug)]
pub struct GenerateResult {
    pub catalog: Catalog,
    pub output_path: PathBuf,
}

impl Catalog {
    /// Paid items that resolved to the fallback URL, in catalog order.
    ///
    /// These need an entry in the shop map to get an exact product link.
    pub fn unmapped(&self) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| {
                item.visibility == Visibility::Paid
                    && item.shop_url.as_deref() == Some(self.shop_fallback_url.as_str())
            })
            .collect()
    }

    /// Pretty-printed JSON with a trailing newline. Non-ASCII is kept literal.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Scan, classify, and write the catalog for `root`.
pub fn generate(root: &Path, config: &CatalogConfig) -> Result<GenerateResult, CatalogError> {
    let (root, catalog) = catalog_at(root, config)?;
    let output_path = root.join(&config.files.output);
    write_catalog(&catalog, &output_path)?;
    Ok(GenerateResult {
        catalog,
        output_path,
    })
}

/// Scan and classify `root` into a sorted catalog without writing anything.
pub fn build_catalog(root: &Path, config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    catalog_at(root, config).map(|(_, catalog)| catalog)
}

/// Build the catalog and return it with the canonical root it was built from.
fn catalog_at(root: &Path, config: &CatalogConfig) -> Result<(PathBuf, Catalog), CatalogError> {
    let root = fs::canonicalize(root).map_err(|source| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let shop_map = match ShopMap::load(&root.join(&config.files.shop_map)) {
        Ok(map) => map,
        // A broken shop map must not block the catalog; paid items fall back.
        Err(_) => ShopMap::default(),
    };

    let classifier = Classifier::new(&root, config, &shop_map);
    let mut items = Vec::new();
    for path in scan::scan(&root, config)? {
        let metadata = fs::metadata(&path).map_err(|source| CatalogError::Stat {
            path: path.clone(),
            source,
        })?;
        items.push(classifier.classify(&path, &metadata)?);
    }

    let catalog = assemble(&root, config, items, Utc::now());
    Ok((root, catalog))
}

/// Build the document from already-classified items.
pub fn assemble(
    root: &Path,
    config: &CatalogConfig,
    mut items: Vec<CatalogItem>,
    generated: DateTime<Utc>,
) -> Catalog {
    sort_items(&mut items);
    Catalog {
        generated_from: root.to_string_lossy().to_string(),
        generated_utc: utc_iso(generated),
        count: items.len(),
        paid_exts: config.shop.paid_exts.iter().cloned().collect(),
        shop_fallback_url: config.shop.fallback_url.clone(),
        items,
    }
}

/// Sort items into catalog order (see module docs).
pub fn sort_items(items: &mut [CatalogItem]) {
    items.sort_by_cached_key(|item| {
        (
            item.category.to_lowercase(),
            item.visibility.as_str(),
            item.title.to_lowercase(),
            item.relative_path.to_lowercase(),
            item.relative_path.clone(),
        )
    });
}

/// Write the catalog atomically to `path`.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    let json = catalog.to_json()?;
    let write_err = |source: io::Error| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut staged = tempfile::Builder::new()
        .prefix(".pubcat-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    staged.write_all(json.as_bytes()).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;
    set_published_permissions(staged.as_file()).map_err(write_err)?;
    staged.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

// Temp files are created owner-only; the catalog is served by the web server.
#[cfg(unix)]
fn set_published_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_published_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
