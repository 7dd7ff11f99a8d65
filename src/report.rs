//! Summary of a generation run.

use std::path::PathBuf;

use crate::diagnostics::{Diagnostic, unreached_files};
use crate::toc::OutlineEntry;

/// What a book or TOC run produced and what it noticed on the way.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Report {
    pub title: String,
    /// The book or TOC file that was written.
    pub artifact: PathBuf,
    /// Pages in `next` link order.
    pub visited: Vec<String>,
    /// Pages that got an `include::` line in the book.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub included: Vec<String>,
    /// Generated TOC entries.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub outline: Vec<OutlineEntry>,
    /// Unreached files copied to the output directory.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub copied: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Files reported as unreached.
    pub fn unreached(&self) -> Vec<&str> {
        unreached_files(&self.diagnostics)
    }
}
