//! Named patterns used by the text strategies.
//!
//! Every regex the recognition engine matches against lives here so each one
//! can be tested on its own.
//!
//! The `regex` crate has no look-around, so the inline pattern is paired with
//! [`find_inline_answers`], which checks the surrounding characters by hand.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Word-bounded digit run on an index row.
    ///
    /// Question indices are 1-3 digits, but longer runs (years, codes) are
    /// captured too so they keep their position in the row; the range filter
    /// discards them at merge time.
    pub static ref HORIZONTAL_NUMBER: Regex = Regex::new(r"\b([0-9]+)\b").unwrap();

    /// Word-bounded single answer letter on an answer row.
    pub static ref HORIZONTAL_LETTER: Regex = Regex::new(r"\b([A-EX])\b").unwrap();

    /// Inline "N LETTER", "N. LETTER" or "N-LETTER" candidate.
    ///
    /// Without a separator at least one whitespace character must sit
    /// between number and letter.
    pub static ref INLINE_ANSWER: Regex =
        Regex::new(r"([0-9]{1,3})\s*(?:[.\-]\s*|\s+)([A-EX])").unwrap();
}

/// Python-style `\w`: Unicode alphanumerics plus underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// All word-bounded digit tokens of an index row, in order.
pub fn index_tokens(line: &str) -> Vec<&str> {
    HORIZONTAL_NUMBER
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// All word-bounded answer letters of an answer row, in order.
pub fn letter_tokens(line: &str) -> Vec<&str> {
    HORIZONTAL_LETTER
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Non-overlapping inline answers in `text` as `(digits, letter)` pairs.
///
/// A candidate is rejected when a digit sits right before its number or a
/// word character right after its letter; scanning then resumes one
/// character past the rejected start.
///
/// ```
/// use gabarito_oxide::strategies::patterns::find_inline_answers;
///
/// let found = find_inline_answers("1 C  2. E  3-X");
/// assert_eq!(found, vec![("1", "C"), ("2", "E"), ("3", "X")]);
/// ```
pub fn find_inline_answers(text: &str) -> Vec<(&str, &str)> {
    let mut found = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(caps) = INLINE_ANSWER.captures_at(text, pos) else {
            break;
        };
        let (Some(whole), Some(digits), Some(letter)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            break;
        };

        let preceded_by_digit = text[..whole.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit());
        let followed_by_word = text[whole.end()..].chars().next().is_some_and(is_word_char);

        if preceded_by_digit || followed_by_word {
            // matches always start on an ASCII digit
            pos = whole.start() + 1;
            continue;
        }

        found.push((digits.as_str(), letter.as_str()));
        pos = whole.end();
    }

    found
}
