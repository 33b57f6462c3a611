//! Catalog configuration module.
//!
//! Handles loading, validating, and merging `catalog.toml`. Every setting has
//! a stock default; a `catalog.toml` in the catalog root overrides only the
//! keys it names.
//!
//! ## Config File Location
//!
//! ```text
//! publications/
//! ├── catalog.toml             # Optional overrides (never cataloged)
//! ├── shop_map.json            # Exact shop links for paid files
//! ├── books/
//! │   └── ...
//! └── audio/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [files]
//! output = "publications.json"  # Catalog written inside the root
//! shop_map = "shop_map.json"    # Shop link table read from inside the root
//!
//! [shop]
//! fallback_url = "https://shop.schizostudios.org/"
//! paid_exts = ["azw3", "epub", "mobi", "pdf"]
//!
//! [skip]
//! names = [".DS_Store", "generate_publications_catalog.py", "index.html",
//!          "publications.json", "shop_map.json"]
//! dirs = [".git", ".github", "__pycache__", "node_modules"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional override file inside the catalog root.
pub const CONFIG_FILENAME: &str = "catalog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Catalog configuration loaded from `catalog.toml`.
///
/// Replaces what would otherwise be module-level constants, so tests and
/// alternate deployments can run the pipeline with their own policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Companion file names inside the root.
    pub files: FilesConfig,
    /// Paid/public policy and shop routing.
    pub shop: ShopConfig,
    /// Junk files and directories excluded from the walk.
    pub skip: SkipConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    pub output: String,
    pub shop_map: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            output: "publications.json".to_string(),
            shop_map: "shop_map.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShopConfig {
    /// Link used for a paid file with no exact shop-map entry.
    pub fallback_url: String,
    /// Extensions (lowercase, no dot) that are sold rather than served.
    pub paid_exts: BTreeSet<String>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            fallback_url: "https://shop.schizostudios.org/".to_string(),
            paid_exts: to_set(&["pdf", "epub", "mobi", "azw3"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkipConfig {
    /// Exact file names never cataloged.
    pub names: BTreeSet<String>,
    /// Directory names pruned wherever they appear in a path.
    pub dirs: BTreeSet<String>,
}

impl Default for SkipConfig {
    fn default() -> Self {
        Self {
            names: to_set(&[
                "index.html",
                "publications.json",
                "generate_publications_catalog.py",
                "shop_map.json",
                ".DS_Store",
            ]),
            dirs: to_set(&[".git", ".github", "__pycache__", "node_modules"]),
        }
    }
}

fn to_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl CatalogConfig {
    /// Validate config values and normalize extensions in place.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let url = self.shop.fallback_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "shop.fallback_url must be an http(s) URL, got '{}'",
                self.shop.fallback_url
            )));
        }
        self.shop.fallback_url = url.to_string();

        let mut exts = BTreeSet::new();
        for ext in &self.shop.paid_exts {
            let normalized = ext.trim().trim_start_matches('.').to_lowercase();
            if normalized.is_empty() {
                return Err(ConfigError::Validation(
                    "shop.paid_exts entries must be non-empty".into(),
                ));
            }
            exts.insert(normalized);
        }
        self.shop.paid_exts = exts;

        for (key, name) in [
            ("files.output", &self.files.output),
            ("files.shop_map", &self.files.shop_map),
        ] {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain file name, got '{name}'"
                )));
            }
        }
        Ok(())
    }

    /// Whether `ext` (already lowercased) is sold rather than served.
    pub fn is_paid(&self, ext: &str) -> bool {
        self.shop.paid_exts.contains(ext)
    }

    /// Whether a file with this name is excluded from the catalog.
    ///
    /// The output, shop map, and config file are always excluded, even when
    /// renamed away from the stock skip list.
    pub fn is_skipped_name(&self, name: &str) -> bool {
        self.skip.names.contains(name)
            || name == self.files.output
            || name == self.files.shop_map
            || name == CONFIG_FILENAME
    }

    /// Whether a directory with this name is pruned from the walk.
    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skip.dirs.contains(name)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CatalogConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so an array
///   like `skip.dirs` is replaced, not extended.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `catalog.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CatalogConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let mut config: CatalogConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `catalog.toml` in the catalog root, falling back to
/// stock defaults when the file is absent.
pub fn load_config(root: &Path) -> Result<CatalogConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `catalog.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# pubcat Configuration
# ====================
# Place this file as catalog.toml in the catalog root. All settings are
# optional; values shown below are the defaults. Unknown keys are errors.

# ---------------------------------------------------------------------------
# Companion files (plain names, resolved inside the catalog root)
# ---------------------------------------------------------------------------
[files]
# The generated catalog. Always overwritten in full.
output = "publications.json"
# Flat JSON object mapping relative paths to exact product URLs:
#   { "books/My Great Novel.pdf": "https://shop.example/products/novel" }
shop_map = "shop_map.json"

# ---------------------------------------------------------------------------
# Paid routing
# ---------------------------------------------------------------------------
[shop]
# Used for paid files missing from the shop map. Such files are listed
# as "unmapped" after every run.
fallback_url = "https://shop.schizostudios.org/"
# Files with these extensions are listed as paid and never served directly.
paid_exts = ["azw3", "epub", "mobi", "pdf"]

# ---------------------------------------------------------------------------
# Exclusions
# ---------------------------------------------------------------------------
[skip]
# Exact file names to leave out. Hidden files (leading dot) are always
# skipped, as are the files named in [files] and catalog.toml itself.
names = [
    ".DS_Store",
    "generate_publications_catalog.py",
    "index.html",
    "publications.json",
    "shop_map.json",
]
# Directory names pruned anywhere in the tree.
dirs = [".git", ".github", "__pycache__", "node_modules"]
"##
}
