//! Filename parsing for catalog entries.
//!
//! Publication files carry no metadata beyond their name and location, so the
//! display title and format are derived from the filename alone.
//!
//! ## Display Titles
//!
//! The extension is dropped, `_` and `-` become spaces, and whitespace runs
//! collapse to one space:
//! - `My Great Novel.pdf` → "My Great Novel"
//! - `demo-track_v2.wav` → "demo track v2"
//! - `__draft -- final__.epub` → "draft final"

/// Result of parsing a catalog filename like `demo-track_v2.wav`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Lowercase extension without the dot. Empty if there is none.
    pub ext: String,
    /// Display title derived from the stem.
    pub title: String,
}

/// Parse a filename into its display title and normalized extension.
///
/// Only the last extension counts: `notes.tar.gz` has ext `gz` and title
/// `notes.tar`. A leading or trailing dot is part of the stem, so `notes.`
/// has no extension and keeps its dot in the title.
pub fn parse_file_name(name: &str) -> ParsedName {
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, ext.to_lowercase()),
        _ => (name, String::new()),
    };
    ParsedName {
        ext,
        title: display_title(stem),
    }
}

/// Turn a filename stem into a display title.
pub fn display_title(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_keeps_spaces() {
        let p = parse_file_name("My Great Novel.pdf");
        assert_eq!(p.title, "My Great Novel");
        assert_eq!(p.ext, "pdf");
    }

    #[test]
    fn separators_become_spaces() {
        let p = parse_file_name("demo-track_v2.wav");
        assert_eq!(p.title, "demo track v2");
        assert_eq!(p.ext, "wav");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(display_title("__draft -- final__"), "draft final");
        assert_eq!(display_title("  a\t\tb  "), "a b");
    }

    #[test]
    fn extension_lowercased() {
        let p = parse_file_name("Cover.EPUB");
        assert_eq!(p.ext, "epub");
        assert_eq!(p.title, "Cover");
    }

    #[test]
    fn no_extension() {
        let p = parse_file_name("README");
        assert_eq!(p.ext, "");
        assert_eq!(p.title, "README");
    }

    #[test]
    fn only_last_extension_counts() {
        let p = parse_file_name("notes.tar.gz");
        assert_eq!(p.ext, "gz");
        assert_eq!(p.title, "notes.tar");
    }

    #[test]
    fn trailing_dot_kept_in_title() {
        let p = parse_file_name("notes.");
        assert_eq!(p.ext, "");
        assert_eq!(p.title, "notes.");
    }

    #[test]
    fn leading_dot_is_not_an_extension() {
        let p = parse_file_name(".profile");
        assert_eq!(p.ext, "");
        assert_eq!(p.title, ".profile");
    }

    #[test]
    fn non_ascii_preserved() {
        let p = parse_file_name("Café_Noir-Überblick.mobi");
        assert_eq!(p.title, "Café Noir Überblick");
        assert_eq!(p.ext, "mobi");
    }
}
