//! Page sources: the upstream decoders that feed the extraction engine.
//!
//! A [`PageSource`] yields one [`RawPage`] per page in document order. A page
//! that cannot be decoded is reported as an error item; the coordinator logs
//! it and carries on as if the page were empty.

pub mod json;
#[cfg(feature = "pdf")]
#[cfg_attr(docsrs, doc(cfg(feature = "pdf")))]
pub mod pdf;

pub use json::JsonPageSource;
#[cfg(feature = "pdf")]
pub use pdf::PdfPageSource;

use std::path::Path;

use crate::error::Result;
use crate::page::RawPage;

/// Trait for anything that yields decoded pages in document order.
pub trait PageSource {
    /// The next page, `None` once the document is exhausted.
    fn next_page(&mut self) -> Option<Result<RawPage>>;

    /// Total number of pages, when known up front.
    fn page_count(&self) -> Option<usize> {
        None
    }
}

impl<S: PageSource + ?Sized> PageSource for Box<S> {
    fn next_page(&mut self) -> Option<Result<RawPage>> {
        (**self).next_page()
    }

    fn page_count(&self) -> Option<usize> {
        (**self).page_count()
    }
}

/// Open a document file as a page source.
///
/// Files ending in `.json` are read as page dumps; anything else is decoded
/// as PDF.
#[cfg(feature = "pdf")]
pub fn open_path(path: impl AsRef<Path>) -> Result<Box<dyn PageSource>> {
    let path = path.as_ref();
    if is_json(path) {
        Ok(Box::new(JsonPageSource::open(path)?))
    } else {
        Ok(Box::new(PdfPageSource::open(path)?))
    }
}

/// Open a document file as a page source.
///
/// Without PDF support every file is read as a JSON page dump.
#[cfg(not(feature = "pdf"))]
pub fn open_path(path: impl AsRef<Path>) -> Result<Box<dyn PageSource>> {
    Ok(Box::new(JsonPageSource::open(path)?))
}

#[cfg_attr(not(feature = "pdf"), allow(dead_code))]
fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Pages already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPageSource {
    pages: std::vec::IntoIter<RawPage>,
    total: usize,
}

impl MemoryPageSource {
    /// Wrap a list of pages.
    pub fn new(pages: Vec<RawPage>) -> Self {
        let total = pages.len();
        Self {
            pages: pages.into_iter(),
            total,
        }
    }
}

impl PageSource for MemoryPageSource {
    fn next_page(&mut self) -> Option<Result<RawPage>> {
        self.pages.next().map(Ok)
    }

    fn page_count(&self) -> Option<usize> {
        Some(self.total)
    }
}
