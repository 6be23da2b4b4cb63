//! Answer pairs from extracted table grids.

use crate::observation::{AnswerObservation, StrategyKind};
use crate::page::{RawPage, Table};

use super::AnswerStrategy;

/// Reads `[number, letter]` rows out of table grids.
///
/// Table extraction already segments columns, so there is no doubt about
/// which token is the index and which is the answer. For each row, absent
/// and empty cells are dropped; the row matches when the first remaining
/// cell is all ASCII digits and the second is exactly one character.
pub struct TableStrategy;

impl TableStrategy {
    /// Scan one table, appending one observation per matching row.
    ///
    /// Returns the number of observations emitted.
    pub fn scan_table(table: &Table, out: &mut Vec<AnswerObservation>) -> usize {
        let before = out.len();

        for row in &table.rows {
            let mut cells = row
                .iter()
                .filter_map(|cell| cell.as_deref())
                .filter(|cell| !cell.is_empty());

            let (Some(first), Some(second)) = (cells.next(), cells.next()) else {
                continue;
            };

            if !first.chars().all(|c| c.is_ascii_digit()) || second.chars().count() != 1 {
                continue;
            }

            if let Some(obs) = AnswerObservation::from_captures(first, second, StrategyKind::Table)
            {
                out.push(obs);
            }
        }

        out.len() - before
    }
}

impl AnswerStrategy for TableStrategy {
    fn observe(&self, page: &RawPage, out: &mut Vec<AnswerObservation>) -> usize {
        page.tables
            .iter()
            .map(|table| Self::scan_table(table, out))
            .sum()
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Table
    }

    fn name(&self) -> &'static str {
        "TableStrategy"
    }
}
