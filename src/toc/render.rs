//! TOC document rendering.

use crate::toc::outline::{EntryKind, OutlineEntry};
use crate::util::{display_len, underline};

/// Header block, title and "Contents" heading of the TOC page.
///
/// `next` is the published name of the title page, so the TOC links into
/// the regular page chain.
pub fn render_preamble(out: &mut String, title: &str, next: &str) {
    out.push_str("type=page\n");
    out.push_str("status=published\n");
    out.push_str(&format!("title={title}\n"));
    out.push_str(&format!("next={next}\n"));
    out.push_str("~~~~~~\n");
    out.push_str(title);
    out.push('\n');
    out.push_str(&underline('=', display_len(title)));
    out.push_str("\n\n");
    out.push_str("[[contents]]\n");
    out.push_str("Contents\n");
    out.push_str("--------\n\n");
}

/// Append one outline entry.
///
/// Chapters become their own underlined heading, everything else a bullet
/// nested by depth.
pub fn render_entry(out: &mut String, entry: &OutlineEntry) {
    let link = entry.link();
    match entry.kind {
        EntryKind::Chapter => {
            out.push('\n');
            if let Some(label) = &entry.label {
                out.push_str(&format!("[[{label}]]\n"));
            }
            out.push_str(&link);
            out.push('\n');
            out.push_str(&underline('~', display_len(&link)));
            out.push_str("\n\n");
        }
        kind => {
            out.push_str(&"*".repeat(kind.depth() as usize));
            out.push(' ');
            out.push_str(&link);
            out.push('\n');
        }
    }
}

/// Render the complete TOC page.
pub fn render_toc(title: &str, next: &str, entries: &[OutlineEntry]) -> String {
    let mut out = String::new();
    render_preamble(&mut out, title, next);
    for entry in entries {
        render_entry(&mut out, entry);
    }
    out
}
