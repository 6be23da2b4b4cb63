//! Inline "number [separator] letter" runs, used as a last resort.
//!
//! Catches answer keys printed as a single list (`1 C  2 E  3 C ...`) or one
//! answer per line. It is much noisier than the block strategy, since any
//! "12 E" in prose matches, so the coordinator only runs it on pages where
//! no horizontal block was found.

use crate::observation::{AnswerObservation, StrategyKind};
use crate::page::RawPage;

use super::patterns::find_inline_answers;
use super::AnswerStrategy;

/// Regex fallback over the whole page text.
pub struct VerticalRegexStrategy;

impl VerticalRegexStrategy {
    /// Scan free text, appending one observation per inline match.
    ///
    /// Returns the number of observations emitted.
    pub fn scan_text(text: &str, out: &mut Vec<AnswerObservation>) -> usize {
        let before = out.len();
        out.extend(
            find_inline_answers(text)
                .into_iter()
                .filter_map(|(n, l)| AnswerObservation::from_captures(n, l, StrategyKind::Vertical)),
        );
        out.len() - before
    }
}

impl AnswerStrategy for VerticalRegexStrategy {
    fn observe(&self, page: &RawPage, out: &mut Vec<AnswerObservation>) -> usize {
        Self::scan_text(&page.text, out)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Vertical
    }

    fn name(&self) -> &'static str {
        "VerticalRegexStrategy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<(u32, char)> {
        let mut out = Vec::new();
        VerticalRegexStrategy::scan_text(text, &mut out);
        out.iter().map(|o| (o.question, o.letter)).collect()
    }

    #[test]
    fn test_inline_list() {
        assert_eq!(scan("...34. A 35 B 36-C..."), vec![(34, 'A'), (35, 'B'), (36, 'C')]);
    }

    #[test]
    fn test_one_answer_per_line() {
        assert_eq!(scan("1 C\n2 E\n3 X\n"), vec![(1, 'C'), (2, 'E'), (3, 'X')]);
    }

    #[test]
    fn test_prose_noise_is_mostly_ignored() {
        assert!(scan("Brasília, 12 de Outubro de 2024. Edital nº 3").is_empty());
    }

    #[test]
    fn test_prose_false_positive_is_accepted() {
        // the fallback is noisy by nature
        assert_eq!(scan("conforme item 12 E do edital"), vec![(12, 'E')]);
    }

    #[test]
    fn test_empty_text() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_observe_tags_source() {
        let mut out = Vec::new();
        let emitted = VerticalRegexStrategy.observe(&RawPage::from_text("9 D"), &mut out);
        assert_eq!(emitted, 1);
        assert_eq!(out[0], AnswerObservation::new(9, 'D', StrategyKind::Vertical));
    }
}
