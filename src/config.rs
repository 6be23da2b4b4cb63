//! Configuration for answer-key extraction.

use crate::error::{Error, Result};
use crate::observation::StrategyKind;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Lowest question number accepted into an answer map.
pub const DEFAULT_MIN_QUESTION: u32 = 1;

/// Highest question number accepted into an answer map.
///
/// Larger values are nearly always page numbers or four-digit years.
pub const DEFAULT_MAX_QUESTION: u32 = 249;

/// A horizontal block needs strictly more numbers and letters than this.
pub const DEFAULT_MIN_BLOCK_TOKENS: usize = 4;

/// Largest allowed difference between number and letter counts in a block.
pub const DEFAULT_MAX_COUNT_SKEW: usize = 5;

/// How repeated observations for one question number are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// The most recently applied observation replaces earlier ones
    #[default]
    LastWriteWins,
    /// The first accepted observation is kept
    FirstWriteWins,
}

/// Answer-key extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Accepted question numbers (inclusive).
    pub question_range: RangeInclusive<u32>,

    /// Horizontal blocks need more than this many numbers and letters.
    pub min_block_tokens: usize,

    /// Horizontal blocks allow at most this count difference.
    pub max_count_skew: usize,

    /// Enabled strategies, in the order their page observations are merged.
    pub merge_order: Vec<StrategyKind>,

    /// Conflict resolution for repeated question numbers.
    pub merge_policy: MergePolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            question_range: DEFAULT_MIN_QUESTION..=DEFAULT_MAX_QUESTION,
            min_block_tokens: DEFAULT_MIN_BLOCK_TOKENS,
            max_count_skew: DEFAULT_MAX_COUNT_SKEW,
            merge_order: StrategyKind::ALL.to_vec(),
            merge_policy: MergePolicy::LastWriteWins,
        }
    }

    /// Set the accepted question range.
    pub fn with_question_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.question_range = range;
        self
    }

    /// Set the horizontal block token threshold.
    pub fn with_min_block_tokens(mut self, tokens: usize) -> Self {
        self.min_block_tokens = tokens;
        self
    }

    /// Set the horizontal block count skew limit.
    pub fn with_max_count_skew(mut self, skew: usize) -> Self {
        self.max_count_skew = skew;
        self
    }

    /// Set the enabled strategies and their merge order.
    pub fn with_merge_order(mut self, order: Vec<StrategyKind>) -> Self {
        self.merge_order = order;
        self
    }

    /// Set the merge policy.
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// Whether a question number passes the range filter.
    pub fn accepts_question(&self, question: u32) -> bool {
        self.question_range.contains(&question)
    }

    /// Check that the configuration can drive an extraction.
    pub fn validate(&self) -> Result<()> {
        if self.question_range.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "empty question range {}..={}",
                self.question_range.start(),
                self.question_range.end()
            )));
        }

        for (i, kind) in self.merge_order.iter().enumerate() {
            if self.merge_order[..i].contains(kind) {
                return Err(Error::InvalidConfig(format!(
                    "strategy '{}' listed twice in merge order",
                    kind
                )));
            }
        }

        Ok(())
    }
}
