//! Per-file classification into catalog items.
//!
//! Stage 2 of the catalog pipeline. Everything about an item comes from its
//! location, its name, and its filesystem metadata:
//!
//! ```text
//! audio/samples/demo-track_v2.wav
//! └─┬─┘ └──┬──┘ └──────┬───────┘
//! category tags   title + ext
//! ```
//!
//! ## Paid routing
//!
//! Files whose extension is in `shop.paid_exts` are listed as paid and always
//! carry a `shop_url`: the exact link from the shop map when there is one,
//! otherwise the configured fallback. Everything else is public with no shop
//! link.

use crate::config::CatalogConfig;
use crate::naming::parse_file_name;
use crate::shop_map::ShopMap;
use crate::types::{CatalogItem, Visibility};
use chrono::{DateTime, Timelike, Utc};
use std::fs::Metadata;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Category assigned to files sitting directly in the catalog root.
pub const UNSORTED: &str = "Unsorted";

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("{0} is not inside the catalog root")]
    OutsideRoot(PathBuf),
    #[error("Cannot read modification time of {path}: {source}")]
    Modified {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Classifies files against one root, config, and shop map.
pub struct Classifier<'a> {
    root: &'a Path,
    config: &'a CatalogConfig,
    shop_map: &'a ShopMap,
}

impl<'a> Classifier<'a> {
    pub fn new(root: &'a Path, config: &'a CatalogConfig, shop_map: &'a ShopMap) -> Self {
        Self {
            root,
            config,
            shop_map,
        }
    }

    /// Build the catalog item for `path` using its already-read metadata.
    pub fn classify(&self, path: &Path, metadata: &Metadata) -> Result<CatalogItem, ClassifyError> {
        let modified = metadata.modified().map_err(|source| ClassifyError::Modified {
            path: path.to_path_buf(),
            source,
        })?;
        let relative_path = self.relative_path(path)?;
        Ok(self.build_item(relative_path, metadata.len(), modified))
    }

    /// Path from the root with `/` separators on every platform.
    fn relative_path(&self, path: &Path) -> Result<String, ClassifyError> {
        let relative = path
            .strip_prefix(self.root)
            .map_err(|_| ClassifyError::OutsideRoot(path.to_path_buf()))?;
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();
        if segments.is_empty() {
            return Err(ClassifyError::OutsideRoot(path.to_path_buf()));
        }
        Ok(segments.join("/"))
    }

    fn build_item(&self, relative_path: String, size_bytes: u64, modified: SystemTime) -> CatalogItem {
        let segments: Vec<&str> = relative_path.split('/').collect();
        let (category, tags) = match segments.as_slice() {
            [category, middle @ .., _file] => (
                category.to_string(),
                middle.iter().map(|s| s.to_string()).collect(),
            ),
            _ => (UNSORTED.to_string(), Vec::new()),
        };
        let file_name = segments.last().copied().unwrap_or_default();
        let parsed = parse_file_name(file_name);

        let (visibility, shop_url) = if self.config.is_paid(&parsed.ext) {
            let url = self
                .shop_map
                .lookup(&relative_path)
                .unwrap_or(self.config.shop.fallback_url.as_str());
            (Visibility::Paid, Some(url.to_string()))
        } else {
            (Visibility::Public, None)
        };

        CatalogItem {
            title: parsed.title,
            relative_path,
            category,
            tags,
            ext: parsed.ext,
            size_bytes,
            updated_utc: utc_iso(modified.into()),
            visibility,
            shop_url,
        }
    }
}

/// ISO-8601 in UTC with an explicit `+00:00` offset.
///
/// Fractional seconds are written to the microsecond and left out entirely
/// when zero: `2024-03-01T12:00:00+00:00`, `2024-03-01T12:00:00.250000+00:00`.
pub fn utc_iso(time: DateTime<Utc>) -> String {
    if time.nanosecond() / 1_000 == 0 {
        time.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    } else {
        time.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use chrono::TimeZone;
    use std::time::Duration;
    use tempfile::TempDir;

    const FALLBACK: &str = "https://shop.schizostudios.org/";

    fn item_for(rel: &str, shop_map: &ShopMap) -> CatalogItem {
        let config = CatalogConfig::default();
        let classifier = Classifier::new(Path::new("/pub"), &config, shop_map);
        classifier.build_item(rel.to_string(), 10, SystemTime::UNIX_EPOCH)
    }

    #[test]
    fn paid_book_without_mapping_uses_fallback() {
        let item = item_for("books/My Great Novel.pdf", &ShopMap::default());
        assert_eq!(item.title, "My Great Novel");
        assert_eq!(item.category, "books");
        assert!(item.tags.is_empty());
        assert_eq!(item.ext, "pdf");
        assert_eq!(item.visibility, Visibility::Paid);
        assert_eq!(item.shop_url.as_deref(), Some(FALLBACK));
    }

    #[test]
    fn public_audio_with_tags() {
        let item = item_for("audio/samples/demo-track_v2.wav", &ShopMap::default());
        assert_eq!(item.title, "demo track v2");
        assert_eq!(item.category, "audio");
        assert_eq!(item.tags, vec!["samples"]);
        assert_eq!(item.ext, "wav");
        assert_eq!(item.visibility, Visibility::Public);
        assert_eq!(item.shop_url, None);
    }

    #[test]
    fn mapped_paid_item_uses_exact_link() {
        let map = ShopMap::parse(r#"{"books/My Great Novel.pdf": "https://shop.example/x"}"#)
            .unwrap();
        let item = item_for("books/My Great Novel.pdf", &map);
        assert_eq!(item.shop_url.as_deref(), Some("https://shop.example/x"));
    }

    #[test]
    fn mapping_ignored_for_public_item() {
        let map = ShopMap::parse(r#"{"audio/a.wav": "https://shop.example/a"}"#).unwrap();
        let item = item_for("audio/a.wav", &map);
        assert_eq!(item.visibility, Visibility::Public);
        assert_eq!(item.shop_url, None);
    }

    #[test]
    fn root_file_is_unsorted() {
        let item = item_for("flyer.png", &ShopMap::default());
        assert_eq!(item.category, UNSORTED);
        assert!(item.tags.is_empty());
    }

    #[test]
    fn deep_path_tags_in_order() {
        let item = item_for("books/series/vol-1/extras/Map.azw3", &ShopMap::default());
        assert_eq!(item.category, "books");
        assert_eq!(item.tags, vec!["series", "vol-1", "extras"]);
        assert_eq!(item.visibility, Visibility::Paid);
    }

    #[test]
    fn uppercase_paid_extension_is_paid() {
        let item = item_for("books/Shout.EPUB", &ShopMap::default());
        assert_eq!(item.ext, "epub");
        assert_eq!(item.visibility, Visibility::Paid);
    }

    #[test]
    fn no_extension_is_public() {
        let item = item_for("misc/LICENSE", &ShopMap::default());
        assert_eq!(item.ext, "");
        assert_eq!(item.visibility, Visibility::Public);
    }

    #[test]
    fn classify_reads_size_and_relative_path() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "zines/issue 01/cover-art.jpg", "12345");
        let config = CatalogConfig::default();
        let map = ShopMap::default();
        let classifier = Classifier::new(tmp.path(), &config, &map);

        let metadata = std::fs::metadata(&path).unwrap();
        let item = classifier.classify(&path, &metadata).unwrap();

        assert_eq!(item.relative_path, "zines/issue 01/cover-art.jpg");
        assert_eq!(item.tags, vec!["issue 01"]);
        assert_eq!(item.size_bytes, 5);
        assert!(item.updated_utc.ends_with("+00:00"));
    }

    #[test]
    fn classify_outside_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let path = write_file(other.path(), "a.pdf", "x");
        let config = CatalogConfig::default();
        let map = ShopMap::default();
        let classifier = Classifier::new(tmp.path(), &config, &map);

        let metadata = std::fs::metadata(&path).unwrap();
        let result = classifier.classify(&path, &metadata);
        assert!(matches!(result, Err(ClassifyError::OutsideRoot(_))));
    }

    #[test]
    fn utc_iso_whole_seconds() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(utc_iso(t), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn utc_iso_fractional_seconds() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
            + chrono::Duration::microseconds(250_000);
        assert_eq!(utc_iso(t), "2024-03-01T12:00:00.250000+00:00");
    }

    #[test]
    fn utc_iso_from_system_time() {
        let t = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400);
        assert_eq!(utc_iso(t.into()), "1970-01-02T00:00:00+00:00");
    }
}
