//! End-to-end extraction scenarios
//!
//! Each test feeds decoded pages through the full pipeline (strategies,
//! range filter, merge, classification) and checks the finished key.

use gabarito_oxide::source::JsonPageSource;
use gabarito_oxide::{
    extract_answer_key, extract_job_role, DocumentExtractor, ExamKind, ExamSection,
    ExtractionConfig, MergePolicy, RawPage, StrategyKind, Table,
};

fn answers(pages: &[RawPage]) -> Vec<(u32, char)> {
    extract_answer_key(pages, ExtractionConfig::default())
        .answers
        .answers()
        .into_iter()
        .collect()
}

#[test]
fn test_table_rows() {
    let page = RawPage::new().with_table(Table::from_strings(&[&["1", "C"], &["2", "E"], &["3", "X"]]));
    let key = extract_answer_key([page], ExtractionConfig::default());

    assert_eq!(
        key.answers.answers().into_iter().collect::<Vec<_>>(),
        vec![(1, 'C'), (2, 'E'), (3, 'X')]
    );
    assert_eq!(key.kind, ExamKind::Binary);
    assert!(key.answers.iter().all(|(_, e)| e.source == StrategyKind::Table));
}

#[test]
fn test_horizontal_block() {
    let page = RawPage::from_text("1  2  3  4  5  6\nC  E  C  C  E  X");
    assert_eq!(
        answers(&[page]),
        vec![(1, 'C'), (2, 'E'), (3, 'C'), (4, 'C'), (5, 'E'), (6, 'X')]
    );
}

#[test]
fn test_inline_list() {
    let page = RawPage::from_text("...34. A 35 B 36-C...");
    let key = extract_answer_key([page], ExtractionConfig::default());

    assert_eq!(
        key.answers.answers().into_iter().collect::<Vec<_>>(),
        vec![(34, 'A'), (35, 'B'), (36, 'C')]
    );
    assert_eq!(key.kind, ExamKind::Multi4);
    assert_eq!(key.metrics.vertical_observations, 3);
}

#[test]
fn test_year_in_index_row_shifts_pairing() {
    let page = RawPage::from_text("2024 10 11 12 13\nA B C D E");
    let key = extract_answer_key([page], ExtractionConfig::default());

    assert_eq!(
        key.answers.answers().into_iter().collect::<Vec<_>>(),
        vec![(10, 'B'), (11, 'C'), (12, 'D'), (13, 'E')]
    );
    assert_eq!(key.metrics.horizontal_observations, 5);
    assert_eq!(key.metrics.out_of_range, 1);
    // B, D and E were all read, so the key looks like five-option
    assert_eq!(key.kind, ExamKind::Multi5);
}

#[test]
fn test_empty_page() {
    let key = extract_answer_key([RawPage::new()], ExtractionConfig::default());
    assert!(key.is_empty());
    assert_eq!(key.metrics.total_observations(), 0);
    assert_eq!(key.metrics.pages, 1);
}

#[test]
fn test_conflict_last_write_wins() {
    let page = RawPage::from_text("7 B").with_table(Table::from_strings(&[&["7", "A"]]));
    let key = extract_answer_key([page], ExtractionConfig::default());

    assert_eq!(key.answers.letter(7), Some('B'));
    assert_eq!(key.answers.get(7).map(|e| e.source), Some(StrategyKind::Vertical));
    assert_eq!(key.metrics.conflicts, 1);
}

#[test]
fn test_conflict_first_write_wins() {
    let page = RawPage::from_text("7 B").with_table(Table::from_strings(&[&["7", "A"]]));
    let config = ExtractionConfig::new().with_merge_policy(MergePolicy::FirstWriteWins);
    let key = extract_answer_key([page], config);

    assert_eq!(key.answers.letter(7), Some('A'));
}

#[test]
fn test_classification_table() {
    let cases: [(&str, ExamKind); 4] = [
        ("1 C 2 E", ExamKind::Binary),
        ("1 A 2 B 3 C 4 D", ExamKind::Multi4),
        ("1 A 2 B 3 C 4 D 5 E", ExamKind::Multi5),
        ("1 A 2 B 3 C 4 D 5 E 6 X", ExamKind::Multi5),
    ];
    for (text, expected) in cases {
        let key = extract_answer_key([RawPage::from_text(text)], ExtractionConfig::default());
        assert_eq!(key.kind, expected, "{}", text);
    }
}

#[test]
fn test_true_false_answer_key_document() {
    let pages = vec![
        RawPage::from_text(
            "CONCURSO PÚBLICO\nGABARITO DEFINITIVO\n\
             1 2 3 4 5 6 7 8 9 10\nC E C C E X E C C E\n\
             11 12 13 14 15 16 17 18 19 20\nE E C C X C E E C C",
        ),
        RawPage::from_text("Página 2 de 2\n21 22 23 24 25\nC C C E E"),
    ];
    let key = extract_answer_key(&pages, ExtractionConfig::default());

    assert_eq!(key.answers.len(), 25);
    assert_eq!(key.answers.letter(6), Some('X'));
    assert_eq!(key.answers.letter(25), Some('E'));
    assert_eq!(key.kind, ExamKind::Binary);
    assert_eq!(key.metrics.fallback_pages, 0);
    assert_eq!(key.metrics.marker_pages, 1);
}

#[test]
fn test_general_and_specific_sections() {
    let general = vec![RawPage::new().with_table(Table::from_strings(&[
        &["Questão", "Gabarito"],
        &["1", "a"],
        &["2", "b"],
    ]))];
    let specific = vec![RawPage::from_text("41 C 42 D 43 E")];
    let key = extract_job_role(&general, &specific, ExtractionConfig::default());

    assert_eq!(key.answers.letter(1), Some('A'));
    assert_eq!(key.answers.get(2).map(|e| e.section), Some(ExamSection::General));
    assert_eq!(key.answers.get(43).map(|e| e.section), Some(ExamSection::Specific));
    assert_eq!(key.kind, ExamKind::Multi5);
}

#[test]
fn test_json_pages_with_null_cells() {
    let json = r#"[
        {"text": "", "tables": [[["1", null, "C"], [null, "2", "E"], ["", "3", "X"]]]},
        {"text": "4 C"}
    ]"#;
    let mut source = JsonPageSource::from_json(json).unwrap();
    let mut extractor = DocumentExtractor::new(ExtractionConfig::default());
    extractor.process_source(&mut source, ExamSection::General);
    let key = extractor.finish();

    assert_eq!(
        key.answers.answers().into_iter().collect::<Vec<_>>(),
        vec![(1, 'C'), (2, 'E'), (3, 'X'), (4, 'C')]
    );
}

#[test]
fn test_custom_question_range() {
    let page = RawPage::from_text("1 2 3 4 5\nA B C D E");
    let config = ExtractionConfig::new().with_question_range(2..=4);
    let key = extract_answer_key([page], config);

    assert_eq!(key.answers.questions().collect::<Vec<_>>(), vec![2, 3, 4]);
    assert_eq!(key.metrics.out_of_range, 2);
}

#[test]
fn test_key_serializes_to_json() {
    let key = extract_answer_key([RawPage::from_text("1 C")], ExtractionConfig::default());
    let value = serde_json::to_value(&key).unwrap();

    assert_eq!(value["kind"], "BINARY");
    assert_eq!(value["answers"]["1"]["letter"], "C");
    assert_eq!(value["answers"]["1"]["source"], "vertical");
    assert_eq!(value["metrics"]["pages"], 1);
}
