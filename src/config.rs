//! Run configuration for the two generators.
//!
//! [`BookConfig`] and [`TocConfig`] are two profiles over the same traversal
//! engine. They differ in where output goes, which unreached files are
//! considered, and what happens to them. Both are immutable once a run
//! starts.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::toc::PatternList;

/// Extension of source pages.
pub const DEFAULT_EXTENSION: &str = "adoc";

/// Default first page of the `next` chain.
pub const DEFAULT_START_PAGE: &str = "title.adoc";

/// Default name of the generated table of contents.
pub const DEFAULT_TOC_FILE: &str = "toc.adoc";

/// Default name of the assembled book.
pub const DEFAULT_BOOK_FILE: &str = "book.adoc";

/// Default attributes file, looked up in the source directory.
pub const DEFAULT_ATTRIBUTES_FILE: &str = "book-attributes.conf";

/// Copyright page that is never linked into the chain.
pub const COPYRIGHT_PAGE: &str = "cpyr.adoc";

/// Default chapter title patterns: a leading number and a space.
pub const DEFAULT_CHAPTER_PATTERNS: &str = r"[0-9]+\s.*";

/// How far an underline may be off from its title and still count.
pub const HEADER_SLOP: usize = 5;

/// What to do with source files that no `next` link reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum UnreachedPolicy {
    /// Copy the file unchanged into the output directory.
    Copy,
    /// Only report it.
    Report,
}

/// Settings of the shared traversal engine, derived from a profile.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub start_page: String,
    pub extension: String,
    pub unreached: UnreachedPolicy,
    /// Files never reported or copied, even if unreached.
    pub skip: Vec<String>,
    /// Only consider files with the page extension as unreached.
    pub markup_only: bool,
}

// ============================================================================
// Book profile
// ============================================================================

/// Parameters for assembling the book.
#[derive(Debug, Clone)]
pub struct BookConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub start_page: String,
    /// Book title. Taken from the start page header when unset.
    pub title: Option<String>,
    pub book_file: String,
    /// Lines copied verbatim after the book title. Skipped if missing.
    pub attributes_file: Option<PathBuf>,
    /// Pages followed for their `next` link but left out of the book.
    pub exclude: Vec<String>,
    pub extension: String,
    pub unreached: UnreachedPolicy,
}

impl BookConfig {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let attributes_file = Some(source_dir.join(DEFAULT_ATTRIBUTES_FILE));
        Self {
            source_dir,
            output_dir: output_dir.into(),
            start_page: DEFAULT_START_PAGE.to_string(),
            title: None,
            book_file: DEFAULT_BOOK_FILE.to_string(),
            attributes_file,
            exclude: vec![DEFAULT_TOC_FILE.to_string()],
            extension: DEFAULT_EXTENSION.to_string(),
            unreached: UnreachedPolicy::Copy,
        }
    }

    pub fn with_start_page(mut self, page: impl Into<String>) -> Self {
        self.start_page = page.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_book_file(mut self, name: impl Into<String>) -> Self {
        self.book_file = name.into();
        self
    }

    pub fn with_attributes_file(mut self, path: Option<PathBuf>) -> Self {
        self.attributes_file = path;
        self
    }

    /// Replace the exclusion list.
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_unreached(mut self, policy: UnreachedPolicy) -> Self {
        self.unreached = policy;
        self
    }

    pub fn is_excluded(&self, page: &str) -> bool {
        self.exclude.iter().any(|e| e == page)
    }

    pub(crate) fn walk_config(&self) -> WalkConfig {
        WalkConfig {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            start_page: self.start_page.clone(),
            extension: self.extension.clone(),
            unreached: self.unreached,
            skip: vec![DEFAULT_TOC_FILE.to_string(), self.book_file.clone()],
            markup_only: false,
        }
    }
}

// ============================================================================
// TOC profile
// ============================================================================

/// Parameters for generating the table of contents.
#[derive(Debug, Clone)]
pub struct TocConfig {
    pub source_dir: PathBuf,
    /// Where the TOC is written. Defaults to the source directory.
    pub output_dir: Option<PathBuf>,
    pub title_page: String,
    pub title: Option<String>,
    pub toc_file: String,
    pub chapter_patterns: PatternList,
    pub ignore_tag_patterns: PatternList,
    pub header_slop: usize,
    pub extension: String,
    pub unreached: UnreachedPolicy,
}

impl TocConfig {
    pub fn new(source_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            source_dir: source_dir.into(),
            output_dir: None,
            title_page: DEFAULT_START_PAGE.to_string(),
            title: None,
            toc_file: DEFAULT_TOC_FILE.to_string(),
            chapter_patterns: PatternList::parse(DEFAULT_CHAPTER_PATTERNS)?,
            ignore_tag_patterns: PatternList::default(),
            header_slop: HEADER_SLOP,
            extension: DEFAULT_EXTENSION.to_string(),
            unreached: UnreachedPolicy::Report,
        })
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_title_page(mut self, page: impl Into<String>) -> Self {
        self.title_page = page.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_toc_file(mut self, name: impl Into<String>) -> Self {
        self.toc_file = name.into();
        self
    }

    /// Comma-separated chapter title patterns.
    pub fn with_chapter_patterns(mut self, csv: &str) -> Result<Self> {
        self.chapter_patterns = PatternList::parse(csv)?;
        Ok(self)
    }

    /// Comma-separated patterns of anchor tags to ignore.
    pub fn with_ignore_tag_patterns(mut self, csv: &str) -> Result<Self> {
        self.ignore_tag_patterns = PatternList::parse(csv)?;
        Ok(self)
    }

    pub fn with_header_slop(mut self, slop: usize) -> Self {
        self.header_slop = slop;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_unreached(mut self, policy: UnreachedPolicy) -> Self {
        self.unreached = policy;
        self
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.source_dir)
    }

    pub(crate) fn walk_config(&self) -> WalkConfig {
        WalkConfig {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir().to_path_buf(),
            start_page: self.title_page.clone(),
            extension: self.extension.clone(),
            unreached: self.unreached,
            skip: vec![
                COPYRIGHT_PAGE.to_string(),
                DEFAULT_TOC_FILE.to_string(),
                self.toc_file.clone(),
            ],
            markup_only: true,
        }
    }
}
