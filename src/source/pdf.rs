//! PDF page decoding with `lopdf`.
//!
//! Only page text is recovered; `lopdf` does not segment tables, so pages
//! decoded here always carry an empty table list and rely on the text
//! strategies.

use std::path::Path;

use lopdf::Document;

use super::PageSource;
use crate::error::Result;
use crate::page::RawPage;

/// Yields the text of each page of a PDF document.
pub struct PdfPageSource {
    document: Document,
    page_numbers: std::vec::IntoIter<u32>,
    total: usize,
}

impl PdfPageSource {
    /// Load a PDF from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let document = Document::load(path)?;
        Ok(Self::from_document(document))
    }

    /// Load a PDF from an in-memory buffer (e.g. a downloaded file).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let document = Document::load_mem(bytes)?;
        Ok(Self::from_document(document))
    }

    /// Wrap an already loaded document.
    pub fn from_document(document: Document) -> Self {
        // get_pages is keyed by 1-based page number, already in order
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        let total = page_numbers.len();
        log::debug!("PDF has {} page(s)", total);
        Self {
            document,
            page_numbers: page_numbers.into_iter(),
            total,
        }
    }
}

impl PageSource for PdfPageSource {
    fn next_page(&mut self) -> Option<Result<RawPage>> {
        let page_number = self.page_numbers.next()?;
        Some(
            self.document
                .extract_text(&[page_number])
                .map(RawPage::from_text)
                .map_err(Into::into),
        )
    }

    fn page_count(&self) -> Option<usize> {
        Some(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let result = PdfPageSource::from_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(Error::Pdf(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(PdfPageSource::open("/nonexistent/gabarito.pdf").is_err());
    }
}
