//! Answer recognition strategies.
//!
//! Each strategy looks at one decoded page and proposes
//! [`AnswerObservation`]s. None of them validate question ranges or resolve
//! conflicts; that is the coordinator's job.
//!
//! # Available Strategies
//!
//! - [`TableStrategy`]: `[number, letter]` rows of extracted tables
//! - [`HorizontalBlockStrategy`]: index row above an answer row
//! - [`VerticalRegexStrategy`]: inline `N. LETTER` runs (fallback only)

pub mod horizontal;
pub mod patterns;
pub mod table;
pub mod vertical;

pub use horizontal::HorizontalBlockStrategy;
pub use table::TableStrategy;
pub use vertical::VerticalRegexStrategy;

use crate::config::ExtractionConfig;
use crate::observation::{AnswerObservation, StrategyKind};
use crate::page::RawPage;

/// Trait for recognizing answer observations on a page.
///
/// Recognition never fails: anything a strategy cannot read is simply not
/// reported.
pub trait AnswerStrategy: Send + Sync {
    /// Append this strategy's observations for `page` to `out`.
    ///
    /// Returns how many observations were appended.
    fn observe(&self, page: &RawPage, out: &mut Vec<AnswerObservation>) -> usize;

    /// The kind tag carried by this strategy's observations.
    fn kind(&self) -> StrategyKind;

    /// Return the name of this strategy for debugging.
    fn name(&self) -> &'static str;
}

/// Create a strategy of the given kind, configured from `config`.
pub fn create_strategy(kind: StrategyKind, config: &ExtractionConfig) -> Box<dyn AnswerStrategy> {
    match kind {
        StrategyKind::Table => Box::new(TableStrategy),
        StrategyKind::Horizontal => Box::new(HorizontalBlockStrategy::from_config(config)),
        StrategyKind::Vertical => Box::new(VerticalRegexStrategy),
    }
}
