//! Shop link table for paid files.
//!
//! `shop_map.json` is maintained by the shop side and maps a file's relative
//! path to the product page selling it:
//!
//! ```json
//! { "books/My Great Novel.pdf": "https://shop.example/products/novel" }
//! ```
//!
//! The file is optional companion input. [`ShopMap::load`] reports what went
//! wrong, and the pipeline decides to carry on with an empty map so a broken
//! table never blocks catalog generation.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopMapError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("shop map must be a JSON object")]
    NotAnObject,
}

/// Normalized relative path → shop URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopMap {
    entries: HashMap<String, String>,
}

impl ShopMap {
    /// Load the table from `path`.
    ///
    /// A missing file is an empty map, not an error. Entries with non-string
    /// values are dropped; keys lose leading `/`, values are trimmed.
    pub fn load(path: &Path) -> Result<Self, ShopMapError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&content)
    }

    /// Parse the JSON text of a shop map.
    pub fn parse(content: &str) -> Result<Self, ShopMapError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let serde_json::Value::Object(object) = value else {
            return Err(ShopMapError::NotAnObject);
        };

        let entries = object
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(url) => Some((
                    key.trim_start_matches('/').to_string(),
                    url.trim().to_string(),
                )),
                _ => None,
            })
            .collect();
        Ok(Self { entries })
    }

    /// Exact shop URL for a relative path, if one is mapped and non-empty.
    pub fn lookup(&self, relative_path: &str) -> Option<&str> {
        self.entries
            .get(relative_path)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let map = ShopMap::load(&tmp.path().join("shop_map.json")).unwrap();
        assert_eq!(map, ShopMap::default());
    }

    #[test]
    fn loads_entries_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shop_map.json");
        fs::write(
            &path,
            r#"{"books/My Great Novel.pdf": "https://shop.example/x"}"#,
        )
        .unwrap();

        let map = ShopMap::load(&path).unwrap();
        assert_eq!(
            map.lookup("books/My Great Novel.pdf"),
            Some("https://shop.example/x")
        );
    }

    #[test]
    fn keys_and_values_normalized() {
        let map = ShopMap::parse(r#"{"//books/a.pdf": "  https://shop.example/a \n"}"#).unwrap();
        assert_eq!(map.lookup("books/a.pdf"), Some("https://shop.example/a"));
        assert_eq!(map.lookup("/books/a.pdf"), None);
    }

    #[test]
    fn non_string_values_dropped() {
        let map = ShopMap::parse(
            r#"{"a.pdf": 42, "b.pdf": null, "c.pdf": ["x"], "d.pdf": "https://shop.example/d"}"#,
        )
        .unwrap();
        for key in ["a.pdf", "b.pdf", "c.pdf"] {
            assert_eq!(map.lookup(key), None, "{key}");
        }
        assert_eq!(map.lookup("d.pdf"), Some("https://shop.example/d"));
    }

    #[test]
    fn blank_value_is_not_a_hit() {
        let map = ShopMap::parse(r#"{"a.pdf": "   "}"#).unwrap();
        assert_eq!(map.lookup("a.pdf"), None);
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let map = ShopMap::parse(r#"{"a.pdf": "https://one/", "a.pdf": "https://two/"}"#).unwrap();
        assert_eq!(map.lookup("a.pdf"), Some("https://two/"));
    }

    #[test]
    fn malformed_json_is_error() {
        let result = ShopMap::parse("{not json");
        assert!(matches!(result, Err(ShopMapError::Json(_))));
    }

    #[test]
    fn non_object_is_error() {
        let result = ShopMap::parse(r#"["books/a.pdf"]"#);
        assert!(matches!(result, Err(ShopMapError::NotAnObject)));
    }
}
