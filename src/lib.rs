//! # booktoc
//!
//! Assemble a jbake-style AsciiDoc page tree into a single book and a
//! generated table of contents.
//!
//! Every page starts with a small header block whose `next` and `prev`
//! links chain the pages into reading order:
//!
//! ```text
//! title=Getting Started
//! prev=title.html
//! next=ch2.html
//! ~~~~~~
//! ```
//!
//! ## Features
//!
//! - Follow `next` links from a start page, validating `prev` back-links
//! - Build `book.adoc` with one `include::` per page and strip the page
//!   headers and redundant titles from the copied pages
//! - Build `toc.adoc` from underlined section titles and anchor tags
//! - Report (or copy through) files the chain never reaches
//!
//! ## Quick Start
//!
//! ```no_run
//! use booktoc::{BookConfig, TocConfig, generate_book, generate_toc};
//!
//! let toc = TocConfig::new("src/main/jbake/content")?.with_title("Administration Guide");
//! generate_toc(&toc)?;
//!
//! let book = BookConfig::new("src/main/jbake/content", "target/book");
//! let report = generate_book(&book)?;
//! for diagnostic in &report.diagnostics {
//!     println!("{diagnostic}");
//! }
//! # Ok::<(), booktoc::Error>(())
//! ```

pub mod book;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod page;
pub mod report;
pub mod toc;
pub(crate) mod util;
pub mod walk;

pub use book::generate_book;
pub use config::{BookConfig, TocConfig, UnreachedPolicy};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use page::{PageHeader, ParsedPage};
pub use report::Report;
pub use toc::{OutlineEntry, generate_toc};
