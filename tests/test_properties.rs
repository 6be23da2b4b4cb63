//! Property-Based Tests
//!
//! Invariants of the recognition strategies and the merge:
//! - table rows map one-to-one onto observations
//! - nothing outside the question range reaches a finished key
//! - extraction is deterministic
//! - horizontal block thresholds
//! - the inline fallback never runs next to an accepted block

use gabarito_oxide::strategies::{HorizontalBlockStrategy, TableStrategy};
use gabarito_oxide::{
    extract_answer_key, AnswerObservation, DocumentExtractor, ExamSection, ExtractionConfig,
    RawPage, StrategyKind, Table,
};
use proptest::prelude::*;

fn letter_row(letters: &[char]) -> String {
    letters.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}

fn number_row(numbers: &[u32]) -> String {
    numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" ")
}

fn answer_letter() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['A', 'B', 'C', 'D', 'E', 'X'])
}

// ============================================================================
// TableStrategy Properties
// ============================================================================

/// Property: a (digits, one-letter) row emits exactly one uppercased observation
#[test]
fn proptest_table_row_emits_one_observation() {
    proptest!(|(n in 0u32..1_000_000, zeros in 0usize..3, letter in "[a-zA-Z]")| {
        let digits = format!("{}{}", "0".repeat(zeros), n);
        let table = Table::from_strings(&[&[digits.as_str(), letter.as_str()]]);
        let mut out = Vec::new();

        prop_assert_eq!(TableStrategy::scan_table(&table, &mut out), 1);
        let expected = letter.to_uppercase().chars().next().unwrap();
        prop_assert_eq!(out, vec![AnswerObservation::new(n, expected, StrategyKind::Table)]);
    });
}

/// Property: rows whose first cell is not all digits never emit
#[test]
fn proptest_table_non_numeric_rows_are_skipped() {
    proptest!(|(first in "[a-z ]{1,6}[0-9]{0,3}", letter in "[A-E]")| {
        let table = Table::from_strings(&[&[first.as_str(), letter.as_str()]]);
        let mut out = Vec::new();
        prop_assert_eq!(TableStrategy::scan_table(&table, &mut out), 0);
    });
}

// ============================================================================
// Merge Properties
// ============================================================================

/// Property: no out-of-range question ever reaches a finished key
#[test]
fn proptest_range_filter_holds() {
    proptest!(|(
        text in "[0-9A-EX .\\-\n]{0,300}",
        rows in prop::collection::vec((0u32..5000, answer_letter()), 0..20),
    )| {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|(n, l)| vec![n.to_string(), l.to_string()])
            .collect();
        let table = Table::new(
            rows.into_iter()
                .map(|r| r.into_iter().map(Some).collect())
                .collect(),
        );
        let page = RawPage::from_text(text).with_table(table);
        let key = extract_answer_key([page], ExtractionConfig::default());

        for q in key.answers.questions() {
            prop_assert!((1..=249).contains(&q), "question {} out of range", q);
        }
    });
}

/// Property: identical input always yields an identical key
#[test]
fn proptest_extraction_is_deterministic() {
    proptest!(|(texts in prop::collection::vec("[0-9A-EX .\\-\n]{0,200}", 1..4))| {
        let pages: Vec<RawPage> = texts.into_iter().map(RawPage::from_text).collect();
        let first = extract_answer_key(&pages, ExtractionConfig::default());
        let second = extract_answer_key(&pages, ExtractionConfig::default());
        prop_assert_eq!(first, second);
    });
}

/// Property: arbitrary text never panics the engine
#[test]
fn proptest_arbitrary_text_does_not_panic() {
    proptest!(|(text in "\\PC{0,300}")| {
        let mut extractor = DocumentExtractor::new(ExtractionConfig::default());
        extractor.process_page(&RawPage::from_text(text), ExamSection::General);
        let key = extractor.finish();
        prop_assert!(key.answers.len() <= 249);
    });
}

// ============================================================================
// HorizontalBlockStrategy Properties
// ============================================================================

/// Property: four or fewer tokens on either row never form a block
#[test]
fn proptest_horizontal_needs_five_tokens() {
    proptest!(|(
        short in prop::collection::vec(1u32..250, 0..=4),
        long in prop::collection::vec(answer_letter(), 0..20),
        numbers_short in any::<bool>(),
    )| {
        let strategy = HorizontalBlockStrategy::default();
        let mut out = Vec::new();
        let (numbers, letters) = if numbers_short {
            (number_row(&short), letter_row(&long))
        } else {
            let letters: Vec<char> = long.iter().copied().take(4).collect();
            let numbers: Vec<u32> = (1..=20).collect();
            (number_row(&numbers), letter_row(&letters))
        };

        prop_assert_eq!(strategy.scan_lines([numbers.as_str(), letters.as_str()], &mut out), 0);
        prop_assert!(out.is_empty());
    });
}

/// Property: a count skew over five never forms a block
#[test]
fn proptest_horizontal_rejects_skew() {
    proptest!(|(count in 5usize..30, extra in 6usize..20, more_numbers in any::<bool>())| {
        let (n, l) = if more_numbers { (count + extra, count) } else { (count, count + extra) };
        let numbers: Vec<u32> = (1..=n as u32).collect();
        let letters = vec!['C'; l];
        let mut out = Vec::new();

        let blocks = HorizontalBlockStrategy::default()
            .scan_lines([number_row(&numbers).as_str(), letter_row(&letters).as_str()], &mut out);
        prop_assert_eq!(blocks, 0);
    });
}

/// Property: an accepted block zips up to the shorter row
#[test]
fn proptest_horizontal_zips_to_shorter_row() {
    proptest!(|(n in 5usize..40, skew in 0usize..=5, letter in answer_letter())| {
        let numbers: Vec<u32> = (1..=(n + skew) as u32).collect();
        let letters = vec![letter; n];
        let mut out = Vec::new();

        let blocks = HorizontalBlockStrategy::default()
            .scan_lines([number_row(&numbers).as_str(), letter_row(&letters).as_str()], &mut out);
        prop_assert_eq!(blocks, 1);
        prop_assert_eq!(out.len(), n);
        for (i, obs) in out.iter().enumerate() {
            prop_assert_eq!(obs.question, i as u32 + 1);
            prop_assert_eq!(obs.letter, letter);
        }
    });
}

// ============================================================================
// Fallback Properties
// ============================================================================

/// Property: vertical never runs on a page with an accepted block
#[test]
fn proptest_vertical_not_run_next_to_block() {
    proptest!(|(
        letters in prop::collection::vec(answer_letter(), 5..15),
        noise in "[0-9A-EX .\\-]{0,80}",
    )| {
        let numbers: Vec<u32> = (1..=letters.len() as u32).collect();
        let text = format!("{}\n{}\n{}\n{}", noise, number_row(&numbers), letter_row(&letters), noise);
        let key = extract_answer_key([RawPage::from_text(text)], ExtractionConfig::default());

        prop_assert_eq!(key.metrics.vertical_observations, 0);
        prop_assert_eq!(key.metrics.fallback_pages, 0);
        prop_assert!(key.answers.iter().all(|(_, e)| e.source != StrategyKind::Vertical));
    });
}
