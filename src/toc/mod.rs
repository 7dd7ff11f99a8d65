//! Table of contents generation.
//!
//! Walks the same `next` chain as the book and turns the section headings
//! of every page into a linked outline:
//!
//! - [`classify`]: pattern lists, anchor kinds and underline checks
//! - [`outline`]: per-page heading extraction
//! - [`render`]: the TOC page itself
//!
//! Unlike the book, unreached pages are only reported (`MISSED: ...`) by
//! default, and only markup files count.

mod classify;
mod outline;
mod render;

use std::fs;

pub use classify::{
    AnchorKind, LineClassifier, PatternList, Underline, anchor_kind, classify_underline,
};
pub use outline::{EntryKind, OutlineEntry, OutlineExtractor};
pub use render::{render_entry, render_preamble, render_toc};

use crate::config::TocConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::page::{ParsedPage, read_title};
use crate::report::Report;
use crate::util::html_name;
use crate::walk::{PageVisitor, ensure_output_dir, walk_chain};

/// Accumulates outline entries across the chain.
struct TocCollector<'a> {
    config: &'a TocConfig,
    extractor: OutlineExtractor<'a>,
    entries: Vec<OutlineEntry>,
}

impl PageVisitor for TocCollector<'_> {
    fn visit(&mut self, name: &str, page: &ParsedPage, diagnostics: &mut Diagnostics) -> Result<()> {
        // the previous TOC may be linked into the chain; never index it
        if name == self.config.toc_file {
            tracing::debug!(page = %name, "skipping TOC page");
            return Ok(());
        }
        let target = html_name(name, &self.config.extension);
        let entries = self
            .extractor
            .extract(name, &target, &page.body, page.body_line, diagnostics);
        tracing::debug!(page = %name, entries = entries.len(), "scanned page");
        self.entries.extend(entries);
        Ok(())
    }
}

/// Generate the table of contents described by `config`.
pub fn generate_toc(config: &TocConfig) -> Result<Report> {
    tracing::debug!(?config, "toc configuration");

    let output_dir = config.output_dir();
    ensure_output_dir(output_dir)?;

    let title = match &config.title {
        Some(title) => title.clone(),
        None => read_title(&config.source_dir, &config.title_page, &config.extension)?,
    };

    let mut diagnostics = Diagnostics::new();
    let mut collector = TocCollector {
        config,
        extractor: OutlineExtractor::new(LineClassifier {
            chapter_patterns: &config.chapter_patterns,
            ignore_tag_patterns: &config.ignore_tag_patterns,
            slop: config.header_slop,
        }),
        entries: Vec::new(),
    };
    let traversal = walk_chain(&config.walk_config(), &mut collector, &mut diagnostics)?;

    let next = html_name(&config.title_page, &config.extension);
    let toc = render_toc(&title, &next, &collector.entries);

    let artifact = output_dir.join(&config.toc_file);
    fs::write(&artifact, toc).map_err(|source| Error::Write {
        path: artifact.clone(),
        source,
    })?;
    tracing::info!(
        toc = %artifact.display(),
        entries = collector.entries.len(),
        "toc written"
    );

    Ok(Report {
        title,
        artifact,
        visited: traversal.visited,
        included: Vec::new(),
        outline: collector.entries,
        copied: traversal.copied,
        diagnostics: diagnostics.into_vec(),
    })
}
