//! CLI output formatting for pipeline results.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! Wrote: /srv/publications/publications.json (12 items)
//!
//! Unmapped paid items (add these to shop_map.json for exact product links):
//!  - books/My Great Novel.pdf
//! ```
//!
//! ## Check
//!
//! ```text
//! Catalog: /srv/publications (12 items)
//!
//! Categories
//! 001 audio (3 items)
//!     Tags: samples
//! 002 books (5 items, 4 paid)
//! 003 Unsorted (4 items)
//!
//! Unmapped paid items (add these to shop_map.json for exact product links):
//!  - books/My Great Novel.pdf
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure — no I/O, no side effects.

use crate::catalog::GenerateResult;
use crate::types::{Catalog, Visibility};
use std::collections::BTreeSet;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Category header: positional index, name, item count, paid count if any.
///
/// ```text
/// 001 audio (3 items)
/// 002 books (5 items, 4 paid)
/// ```
fn category_header(index: usize, name: &str, items: usize, paid: usize) -> String {
    if paid == 0 {
        format!("{} {} ({})", format_index(index), name, plural(items, "item"))
    } else {
        format!(
            "{} {} ({}, {} paid)",
            format_index(index),
            name,
            plural(items, "item"),
            paid
        )
    }
}

/// Unmapped paid items report. Empty when every paid item has a shop link.
fn unmapped_lines(catalog: &Catalog, shop_map_name: &str) -> Vec<String> {
    let unmapped = catalog.unmapped();
    if unmapped.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![
        String::new(),
        format!("Unmapped paid items (add these to {shop_map_name} for exact product links):"),
    ];
    lines.extend(unmapped.iter().map(|item| format!(" - {}", item.relative_path)));
    lines
}

// ============================================================================
// Category summary
// ============================================================================

struct CategorySummary<'a> {
    name: &'a str,
    items: usize,
    paid: usize,
    tags: BTreeSet<&'a str>,
}

/// Group items by category in catalog order.
fn summarize(catalog: &Catalog) -> Vec<CategorySummary<'_>> {
    let mut summaries: Vec<CategorySummary<'_>> = Vec::new();
    for item in &catalog.items {
        let idx = match summaries.iter().position(|s| s.name == item.category) {
            Some(idx) => idx,
            None => {
                summaries.push(CategorySummary {
                    name: &item.category,
                    items: 0,
                    paid: 0,
                    tags: BTreeSet::new(),
                });
                summaries.len() - 1
            }
        };
        let summary = &mut summaries[idx];
        summary.items += 1;
        if item.visibility == Visibility::Paid {
            summary.paid += 1;
        }
        summary.tags.extend(item.tags.iter().map(String::as_str));
    }
    summaries
}

// ============================================================================
// Commands
// ============================================================================

/// Format the result of a `generate` run.
pub fn format_generate_output(result: &GenerateResult, shop_map_name: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "Wrote: {} ({})",
        result.output_path.display(),
        plural(result.catalog.count, "item")
    )];
    lines.extend(unmapped_lines(&result.catalog, shop_map_name));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(result: &GenerateResult, shop_map_name: &str) {
    for line in format_generate_output(result, shop_map_name) {
        println!("{}", line);
    }
}

/// Format the category summary shown by `check`.
pub fn format_check_output(catalog: &Catalog, shop_map_name: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "Catalog: {} ({})",
        catalog.generated_from,
        plural(catalog.count, "item")
    )];

    let summaries = summarize(catalog);
    if !summaries.is_empty() {
        lines.push(String::new());
        lines.push("Categories".to_string());
    }
    for (i, summary) in summaries.iter().enumerate() {
        lines.push(category_header(i + 1, summary.name, summary.items, summary.paid));
        if !summary.tags.is_empty() {
            let tags: Vec<&str> = summary.tags.iter().copied().collect();
            lines.push(format!("{}Tags: {}", indent(1), tags.join(", ")));
        }
    }

    lines.extend(unmapped_lines(catalog, shop_map_name));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(catalog: &Catalog, shop_map_name: &str) {
    for line in format_check_output(catalog, shop_map_name) {
        println!("{}", line);
    }
}
