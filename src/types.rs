//! Types serialized into the catalog document.
//!
//! Field order here is the field order in `publications.json`; the browser
//! front-end reads these names directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a file is served directly or sold through the shop.
///
/// Serialized lowercase. The catalog sorts on [`Visibility::as_str`], so `Paid`
/// lands before `Public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Paid,
    Public,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Paid => "paid",
            Visibility::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cataloged file.
///
/// For paid items `relative_path` is kept as the shop-map key only. Consumers
/// must link `shop_url` instead of fetching the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub title: String,
    /// Path from the catalog root, always `/`-separated.
    pub relative_path: String,
    /// First directory under the root, or `"Unsorted"` for root-level files.
    pub category: String,
    /// Directories between the category and the file.
    pub tags: Vec<String>,
    pub ext: String,
    pub size_bytes: u64,
    pub updated_utc: String,
    pub visibility: Visibility,
    /// Present for paid items only; `null` in JSON otherwise.
    pub shop_url: Option<String>,
}

/// The catalog document written to `publications.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub generated_from: String,
    pub generated_utc: String,
    pub count: usize,
    pub paid_exts: Vec<String>,
    pub shop_fallback_url: String,
    pub items: Vec<CatalogItem>,
}
