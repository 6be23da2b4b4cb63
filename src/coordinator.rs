//! Per-document extraction: strategy scheduling, validation and merge.
//!
//! A [`DocumentExtractor`] owns the answer map of one job role while it is
//! built. Pages are fed strictly in document order; for every page:
//!
//! 1. the table strategy reads the page's tables;
//! 2. the horizontal block strategy reads the page text;
//! 3. the vertical regex strategy reads the page text, but only when the
//!    horizontal strategy accepted no block on this page.
//!
//! The page's observations are then applied strategy by strategy in the
//! configured merge order. Observations outside the question range are
//! dropped, and repeated question numbers are resolved by the merge policy.
//! With the defaults (table, horizontal, vertical; last write wins) a later
//! page overrides an earlier one, and on the same page text overrides tables.
//!
//! Dropping an extractor before [`DocumentExtractor::finish`] discards the
//! partial answer map.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::classify::ExamKind;
use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::exhibit::{AnswerEntry, ExhibitSet};
use crate::observation::{AnswerObservation, ExamSection, StrategyKind};
use crate::page::RawPage;
use crate::source::PageSource;
use crate::strategies::{create_strategy, AnswerStrategy};
use crate::text::contains_marker;

/// Heading word printed on answer-key pages.
pub const ANSWER_KEY_MARKER: &str = "gabarito";

/// Counters collected while extracting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionMetrics {
    /// Pages handed to the extractor, including undecodable ones
    pub pages: usize,
    /// Pages the source failed to decode
    pub failed_pages: usize,
    /// Sub-documents that could not be opened at all
    pub failed_sources: usize,
    /// Pages on which the vertical fallback ran
    pub fallback_pages: usize,
    /// Pages mentioning an answer-key heading ("gabarito")
    pub marker_pages: usize,
    /// Observations from the table strategy
    pub table_observations: usize,
    /// Observations from the horizontal block strategy
    pub horizontal_observations: usize,
    /// Observations from the vertical regex strategy
    pub vertical_observations: usize,
    /// Observations dropped by the question range filter
    pub out_of_range: usize,
    /// Merges that met a different letter for an already answered question
    pub conflicts: usize,
}

impl ExtractionMetrics {
    /// Observations produced by all strategies.
    pub fn total_observations(&self) -> usize {
        self.table_observations + self.horizontal_observations + self.vertical_observations
    }

    fn record(&mut self, kind: StrategyKind, count: usize) {
        match kind {
            StrategyKind::Table => self.table_observations += count,
            StrategyKind::Horizontal => self.horizontal_observations += count,
            StrategyKind::Vertical => self.vertical_observations += count,
        }
    }
}

/// A finished answer key: the frozen map, its exam style and run counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAnswerKey {
    /// Question number → answer
    pub answers: ExhibitSet,
    /// Exam style, computed once when the key was finished
    pub kind: ExamKind,
    /// Extraction counters
    pub metrics: ExtractionMetrics,
}

impl ExtractedAnswerKey {
    /// Whether nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Builds the answer map of one job role from its page stream(s).
pub struct DocumentExtractor {
    config: ExtractionConfig,
    /// Enabled strategies in merge order
    strategies: Vec<Box<dyn AnswerStrategy>>,
    answers: ExhibitSet,
    metrics: ExtractionMetrics,
    label: Option<String>,
}

impl DocumentExtractor {
    /// Create an extractor. The configuration is used as given.
    pub fn new(config: ExtractionConfig) -> Self {
        let strategies = config
            .merge_order
            .iter()
            .map(|&kind| create_strategy(kind, &config))
            .collect();
        Self {
            config,
            strategies,
            answers: ExhibitSet::new(),
            metrics: ExtractionMetrics::default(),
            label: None,
        }
    }

    /// Create an extractor after validating the configuration.
    pub fn try_new(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Name the document in log output (e.g. contest and job role).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// The answer map built so far.
    pub fn answers(&self) -> &ExhibitSet {
        &self.answers
    }

    /// The counters collected so far.
    pub fn metrics(&self) -> &ExtractionMetrics {
        &self.metrics
    }

    fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("document")
    }

    fn strategy(&self, kind: StrategyKind) -> Option<&dyn AnswerStrategy> {
        self.strategies
            .iter()
            .find(|s| s.kind() == kind)
            .map(|s| s.as_ref())
    }

    /// Run the page-level strategy schedule, returning each strategy's
    /// observations. Recognition never fails.
    fn recognize(&mut self, page: &RawPage) -> Vec<(StrategyKind, Vec<AnswerObservation>)> {
        if page.is_blank() {
            return Vec::new();
        }

        let mut found = Vec::with_capacity(self.strategies.len());
        let mut block_found = false;
        let mut ran_fallback = false;

        for kind in StrategyKind::ALL {
            let Some(strategy) = self.strategy(kind) else {
                continue;
            };
            if kind == StrategyKind::Vertical {
                if block_found {
                    continue;
                }
                ran_fallback = true;
            }

            let mut observations = Vec::new();
            let emitted = strategy.observe(page, &mut observations);
            if kind == StrategyKind::Horizontal {
                block_found = emitted > 0;
            }
            found.push((kind, observations));
        }

        if ran_fallback {
            self.metrics.fallback_pages += 1;
        }
        for (kind, observations) in &found {
            self.metrics.record(*kind, observations.len());
        }
        found
    }

    /// Process one page of a sub-document.
    ///
    /// Returns how many observations were accepted into the answer map.
    pub fn process_page(&mut self, page: &RawPage, section: ExamSection) -> usize {
        self.metrics.pages += 1;
        let page_number = self.metrics.pages;
        if contains_marker(&page.text, ANSWER_KEY_MARKER) {
            self.metrics.marker_pages += 1;
        }

        let mut found = self.recognize(page);
        let mut accepted = 0;

        let merge_order = self.config.merge_order.clone();
        for kind in merge_order {
            let Some(index) = found.iter().position(|(k, _)| *k == kind) else {
                continue;
            };
            let (_, observations) = found.swap_remove(index);
            if !observations.is_empty() {
                log::debug!(
                    "{} page {}: {} {} observation(s)",
                    self.label(),
                    page_number,
                    observations.len(),
                    kind
                );
            }
            for obs in &observations {
                if self.apply(obs, section, page_number) {
                    accepted += 1;
                }
            }
        }

        accepted
    }

    /// Validate and merge a single observation.
    fn apply(&mut self, obs: &AnswerObservation, section: ExamSection, page_number: usize) -> bool {
        if !self.config.accepts_question(obs.question) {
            self.metrics.out_of_range += 1;
            return false;
        }

        let entry = AnswerEntry::from_observation(obs, section);
        let outcome = self.answers.merge(obs.question, entry, self.config.merge_policy);
        if outcome.is_conflict() {
            self.metrics.conflicts += 1;
            log::debug!(
                "{} page {}: question {} conflict ({:?}, {} via {})",
                self.label(),
                page_number,
                obs.question,
                outcome,
                obs.letter,
                obs.source
            );
        }
        true
    }

    /// Process pages in order.
    ///
    /// Returns how many observations were accepted into the answer map.
    pub fn process_pages<I>(&mut self, pages: I, section: ExamSection) -> usize
    where
        I: IntoIterator,
        I::Item: Borrow<RawPage>,
    {
        pages
            .into_iter()
            .map(|page| self.process_page(page.borrow(), section))
            .sum()
    }

    /// Drain a page source in order.
    ///
    /// A page the source cannot decode is logged and counted, then treated as
    /// an empty page. Returns how many observations were accepted.
    pub fn process_source(&mut self, source: &mut dyn PageSource, section: ExamSection) -> usize {
        let mut accepted = 0;
        while let Some(next) = source.next_page() {
            match next {
                Ok(page) => accepted += self.process_page(&page, section),
                Err(e) => {
                    self.metrics.failed_pages += 1;
                    log::warn!(
                        "{}: {} page {} could not be decoded: {}",
                        self.label(),
                        section,
                        self.metrics.pages + 1,
                        e
                    );
                    accepted += self.process_page(&RawPage::new(), section);
                },
            }
        }
        accepted
    }

    /// Drain a source that may have failed to open.
    ///
    /// A sub-document that cannot be opened is logged and counted, then
    /// treated as having no pages, so the other sub-documents of the job
    /// role still produce their answers.
    pub fn process_opened<S>(&mut self, opened: Result<S>, section: ExamSection) -> usize
    where
        S: PageSource,
    {
        match opened {
            Ok(mut source) => self.process_source(&mut source, section),
            Err(e) => {
                self.metrics.failed_sources += 1;
                log::warn!("{}: {} document could not be opened: {}", self.label(), section, e);
                0
            },
        }
    }

    /// Freeze the answer map and classify it.
    pub fn finish(self) -> ExtractedAnswerKey {
        let kind = self.answers.classify();
        if self.answers.is_empty() {
            log::warn!(
                "{}: no answers extracted from {} page(s), low confidence",
                self.label(),
                self.metrics.pages
            );
        } else {
            log::info!(
                "{}: {} answer(s) ({}) from {} page(s), {} dropped out of range, {} conflict(s)",
                self.label(),
                self.answers.len(),
                kind,
                self.metrics.pages,
                self.metrics.out_of_range,
                self.metrics.conflicts
            );
        }
        ExtractedAnswerKey {
            answers: self.answers,
            kind,
            metrics: self.metrics,
        }
    }
}

/// Extract the answer key of a single-PDF document with the given config.
pub fn extract_answer_key<I>(pages: I, config: ExtractionConfig) -> ExtractedAnswerKey
where
    I: IntoIterator,
    I::Item: Borrow<RawPage>,
{
    let mut extractor = DocumentExtractor::new(config);
    extractor.process_pages(pages, ExamSection::General);
    extractor.finish()
}

/// Extract one job role's answer key from its general and specific pages.
///
/// The general section is processed first, so under last-write-wins a
/// specific-section answer overrides a general one for the same number.
pub fn extract_job_role<G, S>(general: G, specific: S, config: ExtractionConfig) -> ExtractedAnswerKey
where
    G: IntoIterator,
    G::Item: Borrow<RawPage>,
    S: IntoIterator,
    S::Item: Borrow<RawPage>,
{
    let mut extractor = DocumentExtractor::new(config);
    extractor.process_pages(general, ExamSection::General);
    extractor.process_pages(specific, ExamSection::Specific);
    extractor.finish()
}
