//! Raw text sources feeding the extraction pipeline.
//!
//! OCR and PDF text layers happen upstream; by the time a document reaches
//! this crate it is a UTF-8 text dump, one file per document or per page.

use std::fs;
use std::path::{Path, PathBuf};

use super::extraction::ExtractionError;

/// Largest text dump accepted, in bytes.
pub const MAX_TEXT_BYTES: u64 = 10 * 1024 * 1024;

/// Produces the full text of one document.
pub trait TextSource {
    fn read_text(&self) -> Result<String, ExtractionError>;
}

/// A UTF-8 text dump on disk.
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    path: PathBuf,
    max_bytes: u64,
}

impl PlainTextSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_bytes: MAX_TEXT_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and sanitize without rejecting blank content.
    fn read_sanitized(&self) -> Result<String, ExtractionError> {
        let size = fs::metadata(&self.path)?.len();
        if size > self.max_bytes {
            return Err(ExtractionError::FileTooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        let bytes = fs::read(&self.path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| ExtractionError::EncodingError(e.to_string()))?;
        Ok(sanitize_text(&text))
    }
}

impl TextSource for PlainTextSource {
    fn read_text(&self) -> Result<String, ExtractionError> {
        let text = self.read_sanitized()?;
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        tracing::info!(bytes = text.len(), "Plain text source read");
        Ok(text)
    }
}

/// Several per-page dumps read as one document, in order.
#[derive(Debug, Clone)]
pub struct PagedTextSource {
    pages: Vec<PlainTextSource>,
}

impl PagedTextSource {
    pub fn new(pages: Vec<PlainTextSource>) -> Self {
        Self { pages }
    }
}

impl TextSource for PagedTextSource {
    fn read_text(&self) -> Result<String, ExtractionError> {
        let pages = self
            .pages
            .iter()
            .map(PlainTextSource::read_sanitized)
            .collect::<Result<Vec<_>, _>>()?;

        let text = join_pages(&pages);
        if text.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        tracing::info!(pages = pages.len(), bytes = text.len(), "Paged text source read");
        Ok(text)
    }
}

/// Drop control characters other than newline and tab, and turn
/// non-breaking spaces into plain spaces.
pub fn sanitize_text(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '\u{a0}' | '\u{202f}' => Some(' '),
            '\n' | '\t' => Some(c),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Join per-page text into one document.
///
/// Each non-blank page is preceded by a `--- Page N ---` line, where N is
/// the page's position in the input. Blank pages are skipped.
pub fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(i, text)| format!("--- Page {} ---\n{}", i + 1, text.trim_end()))
        .collect::<Vec<_>>()
        .join("\n")
}
