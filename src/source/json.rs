//! JSON page dumps.
//!
//! Table-aware decoders (for example pdfplumber-based tooling) can export
//! their output as a JSON array of pages:
//!
//! ```text
//! [
//!   {"text": "GABARITO DEFINITIVO\n...", "tables": [[["1", "C"], ["2", null]]]},
//!   {"text": ""}
//! ]
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{MemoryPageSource, PageSource};
use crate::error::Result;
use crate::page::RawPage;

/// Pages read from a JSON array of [`RawPage`].
#[derive(Debug, Clone, Default)]
pub struct JsonPageSource {
    inner: MemoryPageSource,
}

impl JsonPageSource {
    /// Parse pages from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let pages: Vec<RawPage> = serde_json::from_reader(reader)?;
        Ok(Self::from_pages(pages))
    }

    /// Parse pages from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let pages: Vec<RawPage> = serde_json::from_str(json)?;
        Ok(Self::from_pages(pages))
    }

    /// Read pages from a JSON file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Wrap already parsed pages.
    pub fn from_pages(pages: Vec<RawPage>) -> Self {
        Self {
            inner: MemoryPageSource::new(pages),
        }
    }
}

impl PageSource for JsonPageSource {
    fn next_page(&mut self) -> Option<Result<RawPage>> {
        self.inner.next_page()
    }

    fn page_count(&self) -> Option<usize> {
        self.inner.page_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_pages() {
        let json = r#"[
            {"text": "1 2 3 4 5\nC E C E X", "tables": []},
            {"tables": [[["1", "C"], [null, "E"]]]}
        ]"#;
        let mut source = JsonPageSource::from_json(json).unwrap();
        assert_eq!(source.page_count(), Some(2));

        let first = source.next_page().unwrap().unwrap();
        assert!(first.text.starts_with("1 2 3"));

        let second = source.next_page().unwrap().unwrap();
        assert!(second.text.is_empty());
        assert_eq!(second.tables[0].rows[1][0], None);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result = JsonPageSource::from_json(r#"{"text": "not an array"}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = JsonPageSource::open("/nonexistent/pages.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
