//! Page loading.
//!
//! A page is one markup file in the source directory: a header block with
//! navigation links followed by the page body.

mod header;

use std::fs;
use std::io;
use std::path::Path;

pub use header::{PageHeader, ParsedPage, parse_page};

use crate::error::{Error, Result};
use crate::util::decode_text;

/// Read and parse the page `name` from `dir`.
///
/// Errors are plain I/O errors; callers decide whether a missing page is
/// worth more than a warning.
pub fn read_page(dir: &Path, name: &str, extension: &str) -> io::Result<ParsedPage> {
    let bytes = fs::read(dir.join(name))?;
    Ok(parse_page(&decode_text(&bytes), extension))
}

/// Title declared in the header of the start page.
///
/// Used when no title was configured for the run. A start page that does
/// not exist counts as having no title; other read errors are kept.
pub fn read_title(dir: &Path, start_page: &str, extension: &str) -> Result<String> {
    let missing = || Error::MissingTitle {
        page: start_page.to_string(),
    };
    let page = read_page(dir, start_page, extension).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            missing()
        } else {
            Error::Read {
                path: dir.join(start_page),
                source,
            }
        }
    })?;
    page.header.title.ok_or_else(missing)
}
