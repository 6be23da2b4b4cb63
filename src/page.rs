//! Decoded page content handed to the extraction engine.
//!
//! A [`RawPage`] is whatever the upstream decoder managed to recover from one
//! PDF page: its free text and any table grids it segmented. Either part may
//! be empty.

use serde::{Deserialize, Serialize};

/// A single table cell. Extractors report merged or blank cells as `None`.
pub type Cell = Option<String>;

/// One extracted table: ordered rows of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    /// Rows in top-to-bottom order
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table from rows of optional cells.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Create a table where every cell is present.
    ///
    /// ```
    /// use gabarito_oxide::page::Table;
    ///
    /// let table = Table::from_strings(&[&["1", "C"], &["2", "E"]]);
    /// assert_eq!(table.rows.len(), 2);
    /// ```
    pub fn from_strings(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| Some(cell.to_string())).collect())
                .collect(),
        }
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One page's extracted content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPage {
    /// Free text, lines separated by `\n` in layout order
    #[serde(default)]
    pub text: String,

    /// Tables found on the page
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl RawPage {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page holding only text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tables: Vec::new(),
        }
    }

    /// Add a table to the page.
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Text lines in layout order.
    ///
    /// Splits on `\n` only, so an empty text yields a single empty line and
    /// `\r` is left in place.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Whether the page carries neither text nor tables.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.tables.iter().all(Table::is_empty)
    }
}
