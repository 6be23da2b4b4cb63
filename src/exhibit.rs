//! The per-job-role answer map.
//!
//! An [`ExhibitSet`] maps each question number to exactly one answer. It is
//! filled page by page by the coordinator, which also enforces the question
//! range; the set itself only applies the merge policy.

use crate::classify::{classify, ExamKind};
use crate::config::MergePolicy;
use crate::observation::{AnswerObservation, ExamSection, StrategyKind};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, Entry};
use std::collections::{BTreeMap, BTreeSet};

/// The answer recorded for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    /// Uppercase answer letter
    pub letter: char,
    /// Sub-document the answer came from
    pub section: ExamSection,
    /// Strategy whose observation won the merge
    pub source: StrategyKind,
}

impl AnswerEntry {
    /// Build an entry from an observation read in `section`.
    pub fn from_observation(obs: &AnswerObservation, section: ExamSection) -> Self {
        Self {
            letter: obs.letter,
            section,
            source: obs.source,
        }
    }
}

/// What happened when an observation was merged into the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First answer for this question
    Inserted,
    /// The same letter was already recorded
    Confirmed,
    /// A different letter was replaced
    Replaced {
        /// Letter that was overwritten
        previous: char,
    },
    /// A different letter was refused because the first one stays
    Kept {
        /// Letter that was refused
        rejected: char,
    },
}

impl MergeOutcome {
    /// Whether the merge met a different letter for the same question.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Replaced { .. } | Self::Kept { .. })
    }
}

/// Ordered mapping question number → answer for one job role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExhibitSet {
    entries: BTreeMap<u32, AnswerEntry>,
}

impl ExhibitSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of answered questions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no question has an answer.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry recorded for a question.
    pub fn get(&self, question: u32) -> Option<&AnswerEntry> {
        self.entries.get(&question)
    }

    /// The letter recorded for a question.
    pub fn letter(&self, question: u32) -> Option<char> {
        self.entries.get(&question).map(|e| e.letter)
    }

    /// Entries in question order.
    pub fn iter(&self) -> btree_map::Iter<'_, u32, AnswerEntry> {
        self.entries.iter()
    }

    /// Question numbers in ascending order.
    pub fn questions(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Plain question → letter view.
    pub fn answers(&self) -> BTreeMap<u32, char> {
        self.entries.iter().map(|(&q, e)| (q, e.letter)).collect()
    }

    /// Distinct letters used by the key.
    pub fn letters(&self) -> BTreeSet<char> {
        self.entries.values().map(|e| e.letter).collect()
    }

    /// Classify the exam style from the letter vocabulary.
    pub fn classify(&self) -> ExamKind {
        classify(self.letters())
    }

    /// Merge one answer under `policy`.
    ///
    /// Range validation is the caller's responsibility.
    pub(crate) fn merge(
        &mut self,
        question: u32,
        entry: AnswerEntry,
        policy: MergePolicy,
    ) -> MergeOutcome {
        match self.entries.entry(question) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
                MergeOutcome::Inserted
            },
            Entry::Occupied(mut slot) => {
                let current = slot.get().letter;
                match policy {
                    MergePolicy::LastWriteWins => {
                        slot.insert(entry);
                        if current == entry.letter {
                            MergeOutcome::Confirmed
                        } else {
                            MergeOutcome::Replaced { previous: current }
                        }
                    },
                    MergePolicy::FirstWriteWins => {
                        if current == entry.letter {
                            MergeOutcome::Confirmed
                        } else {
                            MergeOutcome::Kept {
                                rejected: entry.letter,
                            }
                        }
                    },
                }
            },
        }
    }
}

impl<'a> IntoIterator for &'a ExhibitSet {
    type Item = (&'a u32, &'a AnswerEntry);
    type IntoIter = btree_map::Iter<'a, u32, AnswerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
