//! Candidate answer facts produced by the recognition strategies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which recognition strategy proposed an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Rows of an extracted table grid
    Table,
    /// Index row directly above an answer row
    Horizontal,
    /// Inline "N. LETTER" runs in free text
    Vertical,
}

impl StrategyKind {
    /// All strategies, in the default merge order.
    pub const ALL: [StrategyKind; 3] =
        [StrategyKind::Table, StrategyKind::Horizontal, StrategyKind::Vertical];

    /// Stable lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    /// Parse a label produced by [`StrategyKind::as_str`].
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == label)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which sub-document of a job role an answer came from.
///
/// Exam boards usually publish the general-knowledge and the
/// specific-knowledge answer keys as two separate PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamSection {
    /// General knowledge ("conhecimentos básicos")
    #[default]
    General,
    /// Specific knowledge ("conhecimentos específicos")
    Specific,
}

impl ExamSection {
    /// Stable lowercase label, used as the stored section value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Specific => "specific",
        }
    }

    /// Parse a label produced by [`ExamSection::as_str`].
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "general" => Some(Self::General),
            "specific" => Some(Self::Specific),
            _ => None,
        }
    }
}

impl fmt::Display for ExamSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate (question number, answer letter) fact.
///
/// Strategies emit these without any range validation; the coordinator
/// decides which ones reach the answer map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerObservation {
    /// Question number as read from the page
    pub question: u32,
    /// Uppercase answer letter
    pub letter: char,
    /// Strategy that produced this observation
    pub source: StrategyKind,
}

impl AnswerObservation {
    /// Create a new observation.
    pub fn new(question: u32, letter: char, source: StrategyKind) -> Self {
        Self {
            question,
            letter,
            source,
        }
    }

    /// Build an observation from captured digit and letter text.
    ///
    /// Returns `None` when the digits do not fit a `u32` or the letter does
    /// not uppercase to exactly one character.
    pub fn from_captures(digits: &str, letter: &str, source: StrategyKind) -> Option<Self> {
        let question = digits.parse::<u32>().ok()?;
        let letter = single_uppercase(letter)?;
        Some(Self::new(question, letter, source))
    }
}

/// Uppercase a one-character string into a single `char`.
fn single_uppercase(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let mut upper = c.to_uppercase();
    let u = upper.next()?;
    match upper.next() {
        Some(_) => None,
        None => Some(u),
    }
}
