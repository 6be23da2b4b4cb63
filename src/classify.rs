//! Exam style classification from an answer key's letter vocabulary.
//!
//! True/false exams only ever use C (correct) and E (incorrect), plus X for
//! annulled questions. Seeing B or D is conclusive evidence of a
//! multiple-choice exam, and E then separates five-option keys from
//! four-option ones.
//!
//! A two-option A/C-only multiple-choice key has neither B nor D and is
//! therefore reported as [`ExamKind::Binary`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exam style of an answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamKind {
    /// True/false style, options C and E
    Binary,
    /// Multiple choice with options A-D
    Multi4,
    /// Multiple choice with options A-E
    Multi5,
}

impl ExamKind {
    /// Stable label used by the answer-key store.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::Multi4 => "MULTI4",
            Self::Multi5 => "MULTI5",
        }
    }

    /// Parse a stored label back into a kind.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "BINARY" => Some(Self::Binary),
            "MULTI4" => Some(Self::Multi4),
            "MULTI5" => Some(Self::Multi5),
            _ => None,
        }
    }

    /// The answer options of this exam style.
    pub fn options(&self) -> &'static [char] {
        match self {
            Self::Binary => &['C', 'E'],
            Self::Multi4 => &['A', 'B', 'C', 'D'],
            Self::Multi5 => &['A', 'B', 'C', 'D', 'E'],
        }
    }
}

impl fmt::Display for ExamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an answer key from its distinct letters.
///
/// ```
/// use gabarito_oxide::classify::{classify, ExamKind};
///
/// assert_eq!(classify(['C', 'E', 'X']), ExamKind::Binary);
/// assert_eq!(classify("ABCD".chars()), ExamKind::Multi4);
/// ```
pub fn classify<I>(letters: I) -> ExamKind
where
    I: IntoIterator<Item = char>,
{
    let mut has_b_or_d = false;
    let mut has_e = false;

    for letter in letters {
        match letter {
            'B' | 'D' => has_b_or_d = true,
            'E' => has_e = true,
            _ => {},
        }
    }

    match (has_b_or_d, has_e) {
        (false, _) => ExamKind::Binary,
        (true, true) => ExamKind::Multi5,
        (true, false) => ExamKind::Multi4,
    }
}
