//! Removing the redundant page title from a page body.
//!
//! Pages usually repeat their title right after the header block, either
//! as a level-0 line or as a title with an `=` underline:
//!
//! ```text
//! = Getting Started
//!
//! [[GSG00001]]
//!
//! Getting Started
//! ===============
//! ```
//!
//! In the book the title comes from the book itself, so the page copy drops
//! it.

use std::iter::Peekable;

use crate::util::display_len;

/// Strip the leading page title from `body`.
///
/// Leading empty lines are dropped. `include::…[]` lines at the very top
/// (and the empty lines between them) are kept and do not count as the
/// first line. The first remaining line is discarded if it is a `= Title`
/// line, or discarded together with the next line if that line is an `=`
/// underline of the same length. Empty lines right after a discarded title
/// are dropped as well; everything else is copied unchanged.
pub fn strip_page_body(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut lines = body.lines().peekable();

    while let Some(line) = lines.next() {
        if line.is_empty() {
            if !out.is_empty() {
                push_line(&mut out, line);
            }
            continue;
        }
        if is_include(line) {
            push_line(&mut out, line);
            continue;
        }
        if line.starts_with("= ") {
            skip_empty(&mut lines);
        } else if lines
            .peek()
            .is_some_and(|next| next.starts_with('=') && display_len(next) == display_len(line))
        {
            lines.next();
            skip_empty(&mut lines);
        } else {
            push_line(&mut out, line);
        }
        break;
    }

    for line in lines {
        push_line(&mut out, line);
    }
    out
}

/// Is `line` a complete `include::target[]` directive?
pub fn is_include(line: &str) -> bool {
    line.starts_with("include::") && line.ends_with("[]")
}

fn skip_empty<'a, I: Iterator<Item = &'a str>>(lines: &mut Peekable<I>) {
    while lines.next_if(|l| l.is_empty()).is_some() {}
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
