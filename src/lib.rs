//! # pubcat
//!
//! Builds `publications.json`, the catalog behind a publications download
//! page. Every file under the catalog root becomes one entry; ebook formats
//! are listed as **paid** and routed to a shop link, everything else is
//! **public** and linked directly.
//!
//! # Architecture: One-Pass Pipeline
//!
//! ```text
//! catalog.toml ─┐
//! shop_map.json ┼─→ scan → classify → sort → publications.json
//! content tree ─┘
//! ```
//!
//! Each run is a full, stateless recomputation. There is no cache and no
//! incremental mode; the catalog is small and rebuilding it is cheap.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `catalog.toml` loading, merging over stock defaults, validation |
//! | [`shop_map`] | Loads the relative-path → shop URL table |
//! | [`scan`] | Walks the root and filters out hidden files and junk |
//! | [`classify`] | Turns one file into a [`types::CatalogItem`] |
//! | [`catalog`] | Sorts, serializes, and atomically writes the catalog |
//! | [`naming`] | Filename → display title and extension |
//! | [`types`] | The serialized catalog document |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Paid Files Are Never Links
//!
//! A paid item keeps its `relative_path` only as the shop-map key. Its
//! `shop_url` is always set: the exact product link if the shop map has one,
//! otherwise the configured fallback. Paid items on the fallback are reported
//! after every run so the shop map can be completed.
//!
//! ## Optional Input Never Blocks
//!
//! A missing or malformed `shop_map.json` degrades to an empty map. The
//! catalog root, `catalog.toml`, and the output location are required: any
//! problem with them aborts the run before the previous catalog is touched.
//!
//! ## Deterministic Output
//!
//! Walk order is whatever the filesystem returns. The catalog is sorted before
//! it is written, so two runs over an unchanged tree differ only in
//! `generated_utc`.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod naming;
pub mod output;
pub mod scan;
pub mod shop_map;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
