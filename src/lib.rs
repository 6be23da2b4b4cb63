//! # Gabarito Oxide
//!
//! Answer-key ("gabarito") extraction for exam-board PDFs.
//!
//! Exam boards publish the official answers of every job role as PDF tables,
//! two-line index/letter blocks or inline `1 C 2 E ...` lists. This crate
//! reads the decoded pages of such a document and rebuilds the mapping
//! question number → answer letter, then classifies the exam style.
//!
//! ## Pipeline
//!
//! - **Sources**: [`source::PageSource`] yields pages in order (PDF through
//!   `lopdf`, or JSON pages produced by a table-aware decoder)
//! - **Strategies**: three recognizers propose observations per page
//!   ([`strategies::TableStrategy`], [`strategies::HorizontalBlockStrategy`],
//!   and the inline fallback [`strategies::VerticalRegexStrategy`])
//! - **Coordinator**: [`DocumentExtractor`] range-checks and merges
//!   observations into an [`ExhibitSet`] under an explicit merge policy
//! - **Classifier**: [`classify::classify`] tells true/false keys from
//!   four- and five-option multiple choice
//! - **Storage**: [`storage::AnswerKeySink`], with an idempotent SQLite store
//!
//! ## Quick Start
//!
//! ```
//! use gabarito_oxide::{extract_answer_key, ExamKind, ExtractionConfig, RawPage};
//!
//! let pages = vec![RawPage::from_text(
//!     "GABARITO DEFINITIVO\n1 2 3 4 5\nC E C X E",
//! )];
//! let key = extract_answer_key(&pages, ExtractionConfig::default());
//!
//! assert_eq!(key.answers.letter(4), Some('X'));
//! assert_eq!(key.kind, ExamKind::Binary);
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Input model and page sources
pub mod page;
pub mod source;
pub mod text;

// Recognition
pub mod observation;
pub mod strategies;

// Merge, classification and output
pub mod classify;
pub mod coordinator;
pub mod exhibit;

// Persistence
pub mod storage;

// Re-exports
pub use classify::ExamKind;
pub use config::{ExtractionConfig, MergePolicy};
pub use coordinator::{
    extract_answer_key, extract_job_role, DocumentExtractor, ExtractedAnswerKey, ExtractionMetrics,
};
pub use error::{Error, Result};
pub use exhibit::{AnswerEntry, ExhibitSet};
pub use observation::{AnswerObservation, ExamSection, StrategyKind};
pub use page::{RawPage, Table};
pub use storage::{AnswerKeySink, JobRoleKey};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
