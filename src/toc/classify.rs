//! Line classification for the outline extractor.
//!
//! Three small questions asked of single lines: is this anchor tag ignored,
//! is this title a chapter, and is this line an underline for the title
//! above it.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::{Error, Result};
use crate::util::display_len;

/// Anchor tags on a `[[...]]` line.
pub(crate) static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([-a-zA-Z0-9]+)\]\]").expect("valid tag regex"));

/// Anchors naming a whole section, e.g. `[[GSG00003]]`.
static BIG_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("valid anchor regex"));

/// Anchors naming a point inside a section, e.g. `[[sthref12]]`.
static SMALL_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("valid anchor regex"));

// ============================================================================
// Pattern lists
// ============================================================================

/// A list of regular expressions matched against whole strings.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Parse a comma-separated list of patterns. Empty items are skipped,
    /// so `""` is the empty list.
    pub fn parse(csv: &str) -> Result<Self> {
        let patterns = csv
            .split(',')
            .filter(|p| !p.is_empty())
            .map(|p| {
                Regex::new(&format!("^(?:{p})$")).map_err(|source| Error::Pattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Does `s` match any pattern in full?
    pub fn matches(&self, s: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(s))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

// ============================================================================
// Anchors
// ============================================================================

/// Which slot an anchor tag fills in the scanning state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// Upper case letters and digits only.
    Big,
    /// Letters and digits in any case.
    Small,
    /// Anything else the tag pattern allows (hyphens).
    Free,
}

pub fn anchor_kind(tag: &str) -> AnchorKind {
    if BIG_ANCHOR.is_match(tag) {
        AnchorKind::Big
    } else if SMALL_ANCHOR.is_match(tag) {
        AnchorKind::Small
    } else {
        AnchorKind::Free
    }
}

// ============================================================================
// Underlines
// ============================================================================

/// How well a line underlines the title above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Underline {
    /// Not an underline of this character.
    None,
    /// Exactly as long as the title.
    Exact,
    /// Off by at most the slop. Accepted, but worth a warning.
    NearMiss,
}

/// Classify `line` as an underline made of `ch` for a title of
/// `title_len` characters.
///
/// Near misses only count for titles longer than `slop`.
pub fn classify_underline(line: &str, ch: char, title_len: usize, slop: usize) -> Underline {
    let len = display_len(line);
    if len == 0 || !line.chars().all(|c| c == ch) {
        return Underline::None;
    }
    if len == title_len {
        Underline::Exact
    } else if title_len > slop && len.abs_diff(title_len) <= slop {
        Underline::NearMiss
    } else {
        Underline::None
    }
}

/// The configured predicates, borrowed from a [`TocConfig`](crate::TocConfig).
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'a> {
    pub chapter_patterns: &'a PatternList,
    pub ignore_tag_patterns: &'a PatternList,
    pub slop: usize,
}

impl LineClassifier<'_> {
    pub fn ignore_tag(&self, tag: &str) -> bool {
        self.ignore_tag_patterns.matches(tag)
    }

    pub fn is_chapter(&self, title: &str) -> bool {
        self.chapter_patterns.matches(title)
    }

    pub fn underline(&self, line: &str, ch: char, title_len: usize) -> Underline {
        classify_underline(line, ch, title_len, self.slop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pattern_list_whole_match() {
        let list = PatternList::parse(r"[0-9]+\s.*").unwrap();
        assert!(list.matches("1 Introduction"));
        assert!(list.matches("12 Security Tasks"));
        assert!(!list.matches("Overview"));
        assert!(!list.matches("Chapter 1 Introduction"));
    }

    #[test]
    fn test_pattern_list_csv() {
        let list = PatternList::parse("Part .*,[A-Z] .*").unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.matches("Part One"));
        assert!(list.matches("A Appendix"));
        assert!(!list.matches("Appendix"));
    }

    #[test]
    fn test_empty_pattern_list() {
        let list = PatternList::parse("").unwrap();
        assert!(list.is_empty());
        assert!(!list.matches(""));
        assert!(!list.matches("anything"));
    }

    #[test]
    fn test_invalid_pattern() {
        match PatternList::parse("ok,(unclosed") {
            Err(Error::Pattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            other => panic!("expected pattern error, got {other:?}"),
        }
    }

    #[test]
    fn test_anchor_kinds() {
        assert_eq!(anchor_kind("INTRO"), AnchorKind::Big);
        assert_eq!(anchor_kind("GSG00003"), AnchorKind::Big);
        assert_eq!(anchor_kind("sthref12"), AnchorKind::Small);
        assert_eq!(anchor_kind("Intro"), AnchorKind::Small);
        assert_eq!(anchor_kind("intro-sub"), AnchorKind::Free);
    }

    #[test]
    fn test_tag_pattern_finds_every_tag() {
        let tags: Vec<_> = TAG_PATTERN
            .captures_iter("[[GSG00003]][[sthref5]]")
            .map(|c| c[1].to_string())
            .collect();
        assert_eq!(tags, vec!["GSG00003", "sthref5"]);
    }

    #[test]
    fn test_underline_exact_and_near_miss() {
        assert_eq!(classify_underline("----------", '-', 10, 5), Underline::Exact);
        assert_eq!(classify_underline("-----", '-', 10, 5), Underline::NearMiss);
        assert_eq!(classify_underline("---------------", '-', 10, 5), Underline::NearMiss);
        assert_eq!(classify_underline("----", '-', 10, 5), Underline::None);
        assert_eq!(classify_underline("----------------", '-', 10, 5), Underline::None);
    }

    #[test]
    fn test_underline_wrong_character() {
        assert_eq!(classify_underline("~~~~~~~~~~", '-', 10, 5), Underline::None);
        assert_eq!(classify_underline("-----~----", '-', 10, 5), Underline::None);
        assert_eq!(classify_underline("", '-', 0, 5), Underline::None);
    }

    #[test]
    fn test_short_titles_need_exact_underlines() {
        assert_eq!(classify_underline("-----", '-', 5, 5), Underline::Exact);
        assert_eq!(classify_underline("------", '-', 5, 5), Underline::None);
        assert_eq!(classify_underline("^^^^", '^', 3, 5), Underline::None);
    }

    proptest! {
        #[test]
        fn prop_underline_tolerance(title_len in 6usize..80, delta in -8i64..=8, slop in 1usize..6) {
            let len = title_len as i64 + delta;
            prop_assume!(len > 0);
            let line = "~".repeat(len as usize);
            let result = classify_underline(&line, '~', title_len, slop);
            let expected = if delta == 0 {
                Underline::Exact
            } else if title_len > slop && delta.unsigned_abs() as usize <= slop {
                Underline::NearMiss
            } else {
                Underline::None
            };
            prop_assert_eq!(result, expected);
        }
    }
}
