//! Per-page anomalies found during a run.
//!
//! None of these stop a run. Each one is logged through `tracing` when it is
//! recorded and kept so callers (and the `--report` output) can inspect them
//! afterwards.

use std::fmt;

/// How loudly a diagnostic is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A single anomaly detected while walking or scanning pages.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Diagnostic {
    /// A page's `prev` link does not name the page whose `next` led to it.
    PrevMismatch {
        page: String,
        declared: String,
        expected: String,
    },
    /// A page named by a `next` link (or the start page) could not be read.
    /// The chain ends here.
    Unreadable {
        page: String,
        #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
        linked_from: Option<String>,
        reason: String,
    },
    /// A source file that no `next` link reaches.
    Unreached { file: String, copied: bool },
    /// An unreached file that should have been copied through but could not
    /// be. The run carries on without it.
    CopyFailed { file: String, reason: String },
    /// A section underline whose length is close to, but not exactly, the
    /// title length. The heading is still accepted.
    UnderlineLength {
        file: String,
        line: usize,
        title: String,
        underline: String,
    },
    /// A section heading without any usable anchor tag above it.
    MissingAnchor {
        file: String,
        line: usize,
        title: String,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::PrevMismatch { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PrevMismatch {
                page,
                declared,
                expected,
            } => write!(f, "prev wrong in {page} - is {declared}, should be {expected}"),
            Diagnostic::Unreadable {
                page,
                linked_from,
                reason,
            } => {
                write!(f, "{page}: can not open ({reason})")?;
                if let Some(from) = linked_from {
                    write!(f, "; next link in {from} ends the chain here")?;
                }
                Ok(())
            }
            Diagnostic::Unreached { file, copied: true } => {
                write!(f, "{file}: not reachable from the start page, copied as is")
            }
            Diagnostic::Unreached {
                file,
                copied: false,
            } => write!(f, "MISSED: {file}"),
            Diagnostic::CopyFailed { file, reason } => {
                write!(f, "{file}: not reachable from the start page, can't copy it ({reason})")
            }
            Diagnostic::UnderlineLength {
                file,
                line,
                title,
                underline,
            } => write!(
                f,
                "{file}:{line}: header line length mismatch: {title:?} underlined with {underline:?}"
            ),
            Diagnostic::MissingAnchor { file, line, title } => write!(
                f,
                "{file}:{line}: no anchor for section {title:?}, linking to the page"
            ),
        }
    }
}

/// Collected diagnostics for one run, in the order they were found.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `diagnostic` and keep it.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Error => tracing::error!("{diagnostic}"),
            Severity::Warning => tracing::warn!("{diagnostic}"),
        }
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files reported as unreached, whether copied or not.
    pub fn unreached(&self) -> Vec<&str> {
        unreached_files(&self.entries)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// Names of the files in `diagnostics` reported as unreached, including
/// those that failed to copy.
pub fn unreached_files(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .filter_map(|d| match d {
            Diagnostic::Unreached { file, .. } | Diagnostic::CopyFailed { file, .. } => {
                Some(file.as_str())
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prev_mismatch_is_an_error() {
        let d = Diagnostic::PrevMismatch {
            page: "b.adoc".into(),
            declared: "x.adoc".into(),
            expected: "a.adoc".into(),
        };
        assert_eq!(d.severity(), Severity::Error);
        assert_eq!(d.to_string(), "prev wrong in b.adoc - is x.adoc, should be a.adoc");
    }

    #[test]
    fn test_unreached_message_depends_on_copy() {
        let missed = Diagnostic::Unreached {
            file: "old.adoc".into(),
            copied: false,
        };
        assert_eq!(missed.to_string(), "MISSED: old.adoc");
        assert_eq!(missed.severity(), Severity::Warning);
    }

    #[test]
    fn test_unreached_listing() {
        let mut diags = Diagnostics::new();
        diags.record(Diagnostic::Unreached {
            file: "a.adoc".into(),
            copied: true,
        });
        diags.record(Diagnostic::MissingAnchor {
            file: "b.adoc".into(),
            line: 3,
            title: "T".into(),
        });
        diags.record(Diagnostic::CopyFailed {
            file: "c.adoc".into(),
            reason: "gone".into(),
        });
        assert_eq!(diags.len(), 3);
        assert_eq!(diags.unreached(), vec!["a.adoc", "c.adoc"]);
    }

    #[test]
    fn test_copy_failure_message() {
        let d = Diagnostic::CopyFailed {
            file: "stale.adoc".into(),
            reason: "No such file or directory".into(),
        };
        assert_eq!(d.severity(), Severity::Warning);
        assert_eq!(
            d.to_string(),
            "stale.adoc: not reachable from the start page, can't copy it (No such file or directory)"
        );
    }
}
