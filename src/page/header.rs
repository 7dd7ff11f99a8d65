//! Header block parsing.
//!
//! Every page starts with a jbake-style prologue:
//!
//! ```text
//! type=page
//! title=Getting Started
//! prev=title.html
//! next=ch2.html
//! ~~~~~~
//! ```
//!
//! The block ends at the first line starting with `~`. Only `title`, `next`
//! and `prev` matter here; other keys are skipped.

use crate::util::page_name;

/// The navigation fields of a page header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHeader {
    pub title: Option<String>,
    /// Source name of the following page (`.html` already mapped back).
    pub next: Option<String>,
    /// Source name of the preceding page (`.html` already mapped back).
    pub prev: Option<String>,
}

/// A page split into its header and the body that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    pub header: PageHeader,
    /// Everything after the terminator line. Empty when there is none.
    pub body: String,
    /// 1-based line number of the first body line in the source file.
    pub body_line: usize,
}

impl PageHeader {
    fn apply(&mut self, line: &str, extension: &str) {
        let Some((key, value)) = line.split_once('=') else {
            return;
        };
        // Later occurrences override earlier ones; an empty value clears.
        let value = Some(value).filter(|v| !v.is_empty());
        match key {
            "title" => self.title = value.map(str::to_string),
            "next" => self.next = value.map(|v| page_name(v, extension)),
            "prev" => self.prev = value.map(|v| page_name(v, extension)),
            _ => {}
        }
    }
}

/// Split `content` into header and body.
///
/// `extension` is the page extension (`adoc`) that `.html` link targets are
/// mapped back to.
pub fn parse_page(content: &str, extension: &str) -> ParsedPage {
    let mut header = PageHeader::default();
    let mut offset = 0;
    let mut line_no = 0;
    let mut terminated = false;

    for raw in content.split_inclusive('\n') {
        line_no += 1;
        offset += raw.len();
        let line = raw.trim_end_matches(['\n', '\r']);
        if line.starts_with('~') {
            terminated = true;
            break;
        }
        header.apply(line, extension);
    }

    let body = if terminated {
        content[offset..].to_string()
    } else {
        String::new()
    };

    ParsedPage {
        header,
        body,
        body_line: line_no + 1,
    }
}
