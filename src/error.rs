//! Error types for booktoc runs.
//!
//! Only problems that make the whole run meaningless end up here. Anything
//! scoped to a single page (missing file, wrong `prev` link, sloppy
//! underline) is a [`Diagnostic`](crate::Diagnostic) instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a book or TOC generation run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("can't create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("can't write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no title configured and none found in the header of {page}")]
    MissingTitle { page: String },

    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("next link cycle: {from} points back to already visited page {page}")]
    NextCycle { page: String, from: String },
}

pub type Result<T> = std::result::Result<T, Error>;
