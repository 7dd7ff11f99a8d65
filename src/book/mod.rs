//! Book assembly.
//!
//! Produces `<output>/book.adoc`:
//!
//! ```text
//! = <title>
//! <lines of the attributes file>
//!
//! include::title.adoc[]
//!
//! include::ch1.adoc[]
//!
//! ```
//!
//! and next to it a copy of every included page with its header block and
//! redundant page title removed. Source files the `next` chain never
//! reaches are copied through unchanged, since they are usually include
//! fragments or attribute files.

mod strip;

use std::fs;
use std::path::Path;

pub use strip::{is_include, strip_page_body};

use crate::config::BookConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::page::{ParsedPage, read_title};
use crate::report::Report;
use crate::util::decode_text;
use crate::walk::{PageVisitor, ensure_output_dir, walk_chain};

/// Collects include lines and writes stripped page copies.
struct BookWriter<'a> {
    config: &'a BookConfig,
    included: Vec<String>,
}

impl PageVisitor for BookWriter<'_> {
    fn visit(&mut self, name: &str, page: &ParsedPage, _: &mut Diagnostics) -> Result<()> {
        if self.config.is_excluded(name) {
            tracing::debug!(page = %name, "excluded from the book");
            return Ok(());
        }

        let out = self.config.output_dir.join(name);
        fs::write(&out, strip_page_body(&page.body))
            .map_err(|source| Error::Write { path: out, source })?;
        self.included.push(name.to_string());
        Ok(())
    }
}

/// Assemble the book described by `config`.
pub fn generate_book(config: &BookConfig) -> Result<Report> {
    tracing::debug!(?config, "book configuration");

    ensure_output_dir(&config.output_dir)?;

    let title = match &config.title {
        Some(title) => title.clone(),
        None => read_title(&config.source_dir, &config.start_page, &config.extension)?,
    };

    let mut diagnostics = Diagnostics::new();
    let mut writer = BookWriter {
        config,
        included: Vec::new(),
    };
    let traversal = walk_chain(&config.walk_config(), &mut writer, &mut diagnostics)?;

    let mut book = format!("= {title}\n");
    if let Some(path) = &config.attributes_file {
        append_attributes(&mut book, path);
    }
    book.push('\n');
    for page in &writer.included {
        book.push_str(&format!("include::{page}[]\n\n"));
    }

    let artifact = config.output_dir.join(&config.book_file);
    fs::write(&artifact, book).map_err(|source| Error::Write {
        path: artifact.clone(),
        source,
    })?;
    tracing::info!(
        book = %artifact.display(),
        pages = writer.included.len(),
        copied = traversal.copied.len(),
        "book written"
    );

    Ok(Report {
        title,
        artifact,
        visited: traversal.visited,
        included: writer.included,
        outline: Vec::new(),
        copied: traversal.copied,
        diagnostics: diagnostics.into_vec(),
    })
}

/// Append the attributes file verbatim. A missing file is normal.
fn append_attributes(book: &mut String, path: &Path) {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no attributes file");
        return;
    }
    match fs::read(path) {
        Ok(bytes) => {
            for line in decode_text(&bytes).lines() {
                book.push_str(line);
                book.push('\n');
            }
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "can't read attributes file: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_book_lists_includes_in_chain_order() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(src.path(), "title.adoc", "title=Guide\nnext=toc.html\n~~~\n= Guide\n");
        write(src.path(), "toc.adoc", "prev=title.html\nnext=b.html\n~~~\nContents\n");
        write(src.path(), "b.adoc", "prev=toc.html\nnext=a.html\n~~~\n= B\n\nBee.\n");
        write(src.path(), "a.adoc", "prev=b.html\n~~~\n= A\n\nAy.\n");

        let config = BookConfig::new(src.path(), out.path());
        let report = generate_book(&config).unwrap();

        let book = fs::read_to_string(out.path().join("book.adoc")).unwrap();
        assert_eq!(
            book,
            "= Guide\n\ninclude::title.adoc[]\n\ninclude::b.adoc[]\n\ninclude::a.adoc[]\n\n"
        );
        assert_eq!(report.visited, vec!["title.adoc", "toc.adoc", "b.adoc", "a.adoc"]);
        assert_eq!(report.included, vec!["title.adoc", "b.adoc", "a.adoc"]);
        assert_eq!(fs::read_to_string(out.path().join("b.adoc")).unwrap(), "Bee.\n");
        assert!(!out.path().join("toc.adoc").exists());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_attributes_follow_title() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(src.path(), "title.adoc", "~~~\n");
        write(src.path(), "book-attributes.conf", ":doctype: book\n:toc:\n");

        let config = BookConfig::new(src.path(), out.path()).with_title("Explicit");
        let report = generate_book(&config).unwrap();

        let book = fs::read_to_string(&report.artifact).unwrap();
        assert!(book.starts_with("= Explicit\n:doctype: book\n:toc:\n\ninclude::title.adoc[]\n"));
        // the attributes file is not part of the chain and gets copied too
        assert_eq!(report.copied, vec!["book-attributes.conf"]);
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(src.path(), "title.adoc", "next=a.html\n~~~\n");

        let result = generate_book(&BookConfig::new(src.path(), out.path()));
        assert!(matches!(result, Err(Error::MissingTitle { .. })));
    }
}
