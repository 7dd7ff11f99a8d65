//! The linked-page walker.
//!
//! Starting at the configured start page, follow each page's `next` link
//! until a page has none. Every page reached is handed to a [`PageVisitor`];
//! the book and TOC generators are the two visitors. Once the chain ends,
//! files in the source directory that were never reached are copied or
//! reported according to the profile.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::config::{UnreachedPolicy, WalkConfig};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{Error, Result};
use crate::page::{ParsedPage, read_page};
use crate::util::has_extension;

/// Receives each page of the `next` chain in order.
pub trait PageVisitor {
    /// Process one page. Problems local to the page should be recorded in
    /// `diagnostics`; an `Err` aborts the whole run.
    fn visit(&mut self, name: &str, page: &ParsedPage, diagnostics: &mut Diagnostics) -> Result<()>;
}

/// Outcome of one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    /// Readable pages in visit order.
    pub visited: Vec<String>,
    /// Unreached files copied to the output directory.
    pub copied: Vec<String>,
}

/// Walk the `next` chain described by `config`.
///
/// A page that cannot be read ends the chain with a warning. Reaching a page
/// a second time means the links form a cycle, which is an error.
pub fn walk_chain<V: PageVisitor>(
    config: &WalkConfig,
    visitor: &mut V,
    diagnostics: &mut Diagnostics,
) -> Result<Traversal> {
    let mut seen = HashSet::new();
    let mut visited = Vec::new();
    let mut previous: Option<String> = None;
    let mut current = Some(config.start_page.clone());

    while let Some(name) = current.take() {
        if !seen.insert(name.clone()) {
            return Err(Error::NextCycle {
                page: name,
                from: previous.unwrap_or_default(),
            });
        }

        let page = match read_page(&config.source_dir, &name, &config.extension) {
            Ok(page) => page,
            Err(err) => {
                diagnostics.record(Diagnostic::Unreadable {
                    page: name,
                    linked_from: previous,
                    reason: err.to_string(),
                });
                break;
            }
        };
        tracing::debug!(page = %name, next = ?page.header.next, "visiting page");

        if let (Some(declared), Some(expected)) = (&page.header.prev, &previous)
            && declared != expected
        {
            diagnostics.record(Diagnostic::PrevMismatch {
                page: name.clone(),
                declared: declared.clone(),
                expected: expected.clone(),
            });
        }

        visitor.visit(&name, &page, diagnostics)?;
        visited.push(name.clone());

        current = page.header.next;
        previous = Some(name);
    }

    let copied = sweep_unreached(config, &seen, diagnostics)?;
    Ok(Traversal { visited, copied })
}

/// Handle every source file the chain did not reach, exactly once each.
///
/// Directories (and links to them) are skipped. A file that fails to copy
/// is recorded and the sweep moves on.
fn sweep_unreached(
    config: &WalkConfig,
    seen: &HashSet<String>,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(&config.source_dir)? {
        let entry = entry?;
        let path = entry.path();
        // follows symlinks, so a link to a directory is skipped as well
        if fs::metadata(&path).is_ok_and(|meta| meta.is_dir()) {
            tracing::debug!(dir = %path.display(), "skipping directory");
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name");
            continue;
        };
        names.push(name);
    }
    names.sort();

    let can_copy = config.unreached == UnreachedPolicy::Copy
        && !same_dir(&config.source_dir, &config.output_dir);
    if config.unreached == UnreachedPolicy::Copy && !can_copy {
        tracing::debug!("output directory is the source directory, unreached files are only reported");
    }

    let mut copied = Vec::new();
    for name in names {
        if seen.contains(&name) || config.skip.iter().any(|s| *s == name) {
            continue;
        }
        if config.markup_only && !has_extension(&name, &config.extension) {
            continue;
        }
        if !can_copy {
            diagnostics.record(Diagnostic::Unreached {
                file: name,
                copied: false,
            });
            continue;
        }
        match fs::copy(config.source_dir.join(&name), config.output_dir.join(&name)) {
            Ok(_) => {
                copied.push(name.clone());
                diagnostics.record(Diagnostic::Unreached {
                    file: name,
                    copied: true,
                });
            }
            Err(err) => diagnostics.record(Diagnostic::CopyFailed {
                file: name,
                reason: err.to_string(),
            }),
        }
    }
    Ok(copied)
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Make sure `dir` exists and is a directory.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| Error::OutputDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}
