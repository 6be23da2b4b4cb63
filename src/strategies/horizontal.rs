//! Two-line answer blocks: a row of question indices directly above a row of
//! answer letters.
//!
//! This is the dominant layout for true/false answer keys:
//!
//! ```text
//!  1  2  3  4  5  6  7  8  9 10
//!  C  E  C  C  E  X  E  C  C  E
//! 11 12 13 14 15 16 17 18 19 20
//!  E  E  C  C  X  C  E  E  C  C
//! ```
//!
//! Every adjacent line pair is a candidate block. A pair is accepted when
//! both rows have enough tokens and their counts are close; the two rows are
//! then zipped positionally. No attempt is made to re-align a row that picked
//! up a stray token; the range filter at merge time is the only guard.

use crate::config::ExtractionConfig;
use crate::observation::{AnswerObservation, StrategyKind};
use crate::page::RawPage;

use super::patterns::{index_tokens, letter_tokens};
use super::AnswerStrategy;

/// Recognizes index-row / answer-row blocks in page text.
#[derive(Debug, Clone)]
pub struct HorizontalBlockStrategy {
    /// Both rows need strictly more tokens than this
    min_block_tokens: usize,
    /// Largest allowed difference between the two token counts
    max_count_skew: usize,
}

impl Default for HorizontalBlockStrategy {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl HorizontalBlockStrategy {
    /// Create a strategy with explicit thresholds.
    pub fn new(min_block_tokens: usize, max_count_skew: usize) -> Self {
        Self {
            min_block_tokens,
            max_count_skew,
        }
    }

    /// Create a strategy using the thresholds of `config`.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.min_block_tokens, config.max_count_skew)
    }

    /// Whether an index row and an answer row form a block.
    pub fn accepts(&self, numbers: usize, letters: usize) -> bool {
        numbers > self.min_block_tokens
            && letters > self.min_block_tokens
            && numbers.abs_diff(letters) <= self.max_count_skew
    }

    /// Scan lines pairwise, appending the observations of every accepted
    /// block. Returns the number of blocks accepted.
    pub fn scan_lines<'a, I>(&self, lines: I, out: &mut Vec<AnswerObservation>) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lines: Vec<&str> = lines.into_iter().collect();
        let mut blocks = 0;

        for pair in lines.windows(2) {
            let numbers = index_tokens(pair[0]);
            let letters = letter_tokens(pair[1]);

            if !self.accepts(numbers.len(), letters.len()) {
                continue;
            }

            blocks += 1;
            // zip stops at the shorter row
            out.extend(numbers.iter().zip(letters.iter()).filter_map(|(n, l)| {
                // overflowing runs saturate and fall out at the range filter
                let question = n.parse::<u32>().unwrap_or(u32::MAX);
                l.chars()
                    .next()
                    .map(|letter| AnswerObservation::new(question, letter, StrategyKind::Horizontal))
            }));
        }

        blocks
    }
}

impl AnswerStrategy for HorizontalBlockStrategy {
    fn observe(&self, page: &RawPage, out: &mut Vec<AnswerObservation>) -> usize {
        let before = out.len();
        let blocks = self.scan_lines(page.lines(), out);
        log::trace!("{}: {} block(s) accepted", self.name(), blocks);
        out.len() - before
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Horizontal
    }

    fn name(&self) -> &'static str {
        "HorizontalBlockStrategy"
    }
}
