//! Section outline extraction.
//!
//! Pages mark sections with underlined titles and put anchor tags above
//! them:
//!
//! ```text
//! [[GSG00002]][[sthref5]]
//!
//! 1 Getting Started
//! -----------------
//!
//! [[install-prereqs]]
//!
//! Prerequisites
//! ~~~~~~~~~~~~~
//! ```
//!
//! `-` underlines are depth 1 (chapters or top level sections), `~` depth 2
//! and `^` depth 3. Each heading becomes an [`OutlineEntry`] linking to the
//! published page with the best anchor seen since the previous heading.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::toc::classify::{AnchorKind, LineClassifier, TAG_PATTERN, Underline, anchor_kind};
use crate::util::display_len;

/// Titles shorter than this are never headings.
const MIN_TITLE_LEN: usize = 3;

/// `-` underlines shorter than this are never depth 1 headings.
const MIN_SECTION_UNDERLINE_LEN: usize = 5;

/// What kind of heading an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum EntryKind {
    /// Depth 1 title matching a chapter pattern.
    Chapter,
    /// Depth 1 title.
    Section,
    /// Depth 2 title.
    Subsection,
    /// Depth 3 title.
    Subsubsection,
}

impl EntryKind {
    pub fn depth(self) -> u8 {
        match self {
            EntryKind::Chapter | EntryKind::Section => 1,
            EntryKind::Subsection => 2,
            EntryKind::Subsubsection => 3,
        }
    }
}

/// One line of the generated table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct OutlineEntry {
    pub kind: EntryKind,
    pub title: String,
    /// Anchor inside the target page. `None` links to the page itself.
    pub anchor: Option<String>,
    /// Free-form anchor tag placed in front of a chapter heading.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub label: Option<String>,
    /// Published (`.html`) name of the page.
    pub target: String,
    /// Source line of the title.
    pub line: usize,
}

impl OutlineEntry {
    pub fn depth(&self) -> u8 {
        self.kind.depth()
    }

    /// The AsciiDoc link macro for this entry.
    pub fn link(&self) -> String {
        match &self.anchor {
            Some(anchor) => format!("link:{}#{}[{}]", self.target, anchor, self.title),
            None => format!("link:{}[{}]", self.target, self.title),
        }
    }
}

/// Anchors seen since the last heading.
#[derive(Debug, Default)]
struct AnchorState {
    big: Option<String>,
    small: Option<String>,
    free: Option<String>,
    seen_content: bool,
}

impl AnchorState {
    fn observe(&mut self, tag: &str) {
        match anchor_kind(tag) {
            AnchorKind::Big => {
                self.big = Some(tag.to_string());
                self.seen_content = false;
            }
            AnchorKind::Small => {
                self.small = Some(tag.to_string());
                // prefer the anchor closest to the heading
                if self.seen_content {
                    self.big = None;
                }
            }
            AnchorKind::Free => {
                self.free = Some(tag.to_string());
                if self.big.is_none() && self.small.is_none() {
                    self.big = Some(tag.to_string());
                }
            }
        }
    }

    /// Resolve the anchor and free label for a heading and start over.
    fn take(&mut self) -> (Option<String>, Option<String>) {
        let state = std::mem::take(self);
        (state.big.or(state.small), state.free)
    }
}

/// Scans page bodies for headings.
#[derive(Debug, Clone, Copy)]
pub struct OutlineExtractor<'a> {
    classifier: LineClassifier<'a>,
}

impl<'a> OutlineExtractor<'a> {
    pub fn new(classifier: LineClassifier<'a>) -> Self {
        Self { classifier }
    }

    /// Extract the outline of one page.
    ///
    /// `file` is the source page name used in diagnostics, `target` the
    /// published name used in links, and `first_line` the source line
    /// number of the first body line.
    pub fn extract(
        &self,
        file: &str,
        target: &str,
        body: &str,
        first_line: usize,
        diagnostics: &mut Diagnostics,
    ) -> Vec<OutlineEntry> {
        let mut entries = Vec::new();
        let mut anchors = AnchorState::default();
        let mut last_line = "";

        for (index, line) in body.lines().enumerate() {
            let line_no = first_line + index;

            if line.starts_with("[[") && line.ends_with("]]") {
                for caps in TAG_PATTERN.captures_iter(line) {
                    let tag = &caps[1];
                    if !self.classifier.ignore_tag(tag) {
                        anchors.observe(tag);
                    }
                }
            } else if let Some(kind) = self.heading_kind(file, line_no, last_line, line, diagnostics) {
                let (anchor, label) = anchors.take();
                if anchor.is_none() {
                    diagnostics.record(Diagnostic::MissingAnchor {
                        file: file.to_string(),
                        line: line_no - 1,
                        title: last_line.to_string(),
                    });
                }
                entries.push(OutlineEntry {
                    kind,
                    title: last_line.to_string(),
                    anchor,
                    label: label.filter(|_| kind == EntryKind::Chapter),
                    target: target.to_string(),
                    line: line_no - 1,
                });
            } else if !line.is_empty() {
                anchors.seen_content = true;
            }

            last_line = line;
        }

        entries
    }

    /// Is `line` an underline making `title` a heading, and of which kind?
    fn heading_kind(
        &self,
        file: &str,
        line_no: usize,
        title: &str,
        line: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<EntryKind> {
        let title_len = display_len(title);
        if title_len < MIN_TITLE_LEN {
            return None;
        }

        let mut accept = |ch: char| match self.classifier.underline(line, ch, title_len) {
            Underline::None => false,
            Underline::Exact => true,
            Underline::NearMiss => {
                diagnostics.record(Diagnostic::UnderlineLength {
                    file: file.to_string(),
                    line: line_no,
                    title: title.to_string(),
                    underline: line.to_string(),
                });
                true
            }
        };

        if display_len(line) >= MIN_SECTION_UNDERLINE_LEN && accept('-') {
            Some(if self.classifier.is_chapter(title) {
                EntryKind::Chapter
            } else {
                EntryKind::Section
            })
        } else if accept('~') {
            Some(EntryKind::Subsection)
        } else if accept('^') {
            Some(EntryKind::Subsubsection)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::PatternList;

    struct Fixture {
        chapters: PatternList,
        ignore: PatternList,
    }

    impl Fixture {
        fn new(ignore: &str) -> Self {
            Self {
                chapters: PatternList::parse(r"[0-9]+\s.*").unwrap(),
                ignore: PatternList::parse(ignore).unwrap(),
            }
        }

        fn extract(&self, body: &str) -> (Vec<OutlineEntry>, Diagnostics) {
            let extractor = OutlineExtractor::new(LineClassifier {
                chapter_patterns: &self.chapters,
                ignore_tag_patterns: &self.ignore,
                slop: 5,
            });
            let mut diagnostics = Diagnostics::new();
            let entries = extractor.extract("ch1.adoc", "ch1.html", body, 1, &mut diagnostics);
            (entries, diagnostics)
        }
    }

    fn anchors(entries: &[OutlineEntry]) -> Vec<Option<&str>> {
        entries.iter().map(|e| e.anchor.as_deref()).collect()
    }

    #[test]
    fn test_big_anchor_wins_without_content_between() {
        let (entries, _) = Fixture::new("").extract("[[INTRO]]\n[[intro-sub]]\n\nOverview\n--------\n");
        assert_eq!(anchors(&entries), vec![Some("INTRO")]);
    }

    #[test]
    fn test_small_anchor_wins_after_content() {
        let body = "[[BIG01]]\n\nSome paragraph.\n\n[[sthref3]]\n\nDetails\n-------\n";
        let (entries, _) = Fixture::new("").extract(body);
        assert_eq!(anchors(&entries), vec![Some("sthref3")]);
    }

    #[test]
    fn test_small_anchor_without_content_keeps_big() {
        let (entries, _) = Fixture::new("").extract("[[BIG01]]\n[[sthref3]]\nDetails\n-------\n");
        assert_eq!(anchors(&entries), vec![Some("BIG01")]);
    }

    #[test]
    fn test_tags_on_one_line() {
        let (entries, _) = Fixture::new("").extract("[[GSG00002]][[sthref5]]\n\nDetails\n~~~~~~~\n");
        assert_eq!(anchors(&entries), vec![Some("GSG00002")]);
    }

    #[test]
    fn test_free_link_labels_chapter() {
        let body = "[[getting-started]]\n\n1 Getting Started\n-----------------\n";
        let (entries, diags) = Fixture::new("").extract(body);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Chapter);
        assert_eq!(entries[0].anchor.as_deref(), Some("getting-started"));
        assert_eq!(entries[0].label.as_deref(), Some("getting-started"));
        assert_eq!(entries[0].line, 3);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_free_link_not_kept_for_sections() {
        let (entries, _) = Fixture::new("").extract("[[ABC]]\n[[a-b]]\nOverview\n--------\n");
        assert_eq!(entries[0].anchor.as_deref(), Some("ABC"));
        assert_eq!(entries[0].label, None);
    }

    #[test]
    fn test_chapter_versus_section() {
        let body = "[[A]]\n1 Introduction\n--------------\n[[B]]\nOverview\n--------\n";
        let (entries, _) = Fixture::new("").extract(body);
        let kinds: Vec<_> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EntryKind::Chapter, EntryKind::Section]);
        assert_eq!(entries[1].depth(), 1);
    }

    #[test]
    fn test_depths() {
        let body = "[[A]]\nTop Level\n---------\n[[B]]\nSecond\n~~~~~~\n[[C]]\nThird\n^^^^^\n";
        let (entries, _) = Fixture::new("").extract(body);
        let depths: Vec<_> = entries.iter().map(|e| e.depth()).collect();
        assert_eq!(depths, vec![1, 2, 3]);
        assert_eq!(anchors(&entries), vec![Some("A"), Some("B"), Some("C")]);
    }

    #[test]
    fn test_anchor_state_resets_after_heading() {
        let body = "[[FIRST]]\nOne Title\n---------\nText.\n\nTwo Title\n~~~~~~~~~\n";
        let (entries, diags) = Fixture::new("").extract(body);
        assert_eq!(anchors(&entries), vec![Some("FIRST"), None]);
        assert_eq!(entries[1].link(), "link:ch1.html[Two Title]");
        assert_eq!(
            diags.iter().collect::<Vec<_>>(),
            vec![&Diagnostic::MissingAnchor {
                file: "ch1.adoc".into(),
                line: 6,
                title: "Two Title".into(),
            }]
        );
    }

    #[test]
    fn test_exact_underline_is_silent() {
        let (entries, diags) = Fixture::new("").extract("[[X]]\nInstallation\n------------\n");
        assert_eq!(entries.len(), 1);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_near_miss_underline_warns() {
        // title is 12 characters, underline 17
        let (entries, diags) = Fixture::new("").extract("[[X]]\nInstallation\n-----------------\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(
            diags.iter().collect::<Vec<_>>(),
            vec![&Diagnostic::UnderlineLength {
                file: "ch1.adoc".into(),
                line: 3,
                title: "Installation".into(),
                underline: "-----------------".into(),
            }]
        );
    }

    #[test]
    fn test_underline_beyond_slop_is_not_a_heading() {
        let (entries, diags) = Fixture::new("").extract("[[X]]\nInstallation\n------------------\n");
        assert!(entries.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_short_titles_and_underlines() {
        // two character titles never count; `-` underlines need five characters
        let (entries, _) = Fixture::new("").extract("[[X]]\nAb\n--\n\nAbc\n---\n\nAbcd\n~~~~\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Abcd");
        assert_eq!(entries[0].kind, EntryKind::Subsection);
    }

    #[test]
    fn test_ignored_tags() {
        let body = "[[GOOD]]\nText\n[[sthref9]]\n[[IGNOREME]]\nTitle\n-----\n";
        let (entries, _) = Fixture::new("IGNORE.*").extract(body);
        assert_eq!(anchors(&entries), vec![Some("sthref9")]);
    }

    #[test]
    fn test_link_formatting() {
        let entry = OutlineEntry {
            kind: EntryKind::Section,
            title: "Overview".into(),
            anchor: Some("OVW".into()),
            label: None,
            target: "ch1.html".into(),
            line: 1,
        };
        assert_eq!(entry.link(), "link:ch1.html#OVW[Overview]");
    }
}
