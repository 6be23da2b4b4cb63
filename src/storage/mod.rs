//! Persistence of finished answer keys.
//!
//! The extractor never touches storage itself: a caller hands a finished
//! [`ExtractedAnswerKey`] to an [`AnswerKeySink`] together with the job role
//! it belongs to. Writes are idempotent, so re-running an extraction updates
//! rows instead of duplicating them.

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use crate::classify::ExamKind;
use crate::coordinator::ExtractedAnswerKey;
use crate::error::Result;
use crate::exhibit::ExhibitSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one job role within one contest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobRoleKey {
    /// Contest name (e.g. "TRF 1ª Região 2024")
    pub contest: String,
    /// Job role name (e.g. "Analista Judiciário")
    pub job_role: String,
}

impl JobRoleKey {
    /// Create a new key.
    pub fn new(contest: impl Into<String>, job_role: impl Into<String>) -> Self {
        Self {
            contest: contest.into(),
            job_role: job_role.into(),
        }
    }
}

impl fmt::Display for JobRoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.contest, self.job_role)
    }
}

/// An answer key read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAnswerKey {
    /// Exam style recorded for the job role
    pub kind: ExamKind,
    /// Stored answers
    pub answers: ExhibitSet,
}

/// Destination for finished answer keys.
pub trait AnswerKeySink {
    /// Store the answers of one job role.
    ///
    /// Returns the number of answer rows written. An empty key writes nothing
    /// and returns 0.
    fn store(&mut self, key: &JobRoleKey, answers: &ExtractedAnswerKey) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_role_key_display() {
        let key = JobRoleKey::new("TJ-SP 2023", "Escrevente");
        assert_eq!(key.to_string(), "TJ-SP 2023 / Escrevente");
    }
}
