pub mod store;

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use store::ProgressStore;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub id: String,
    pub ts: String,
    #[serde(default)]
    pub notes: String,
}

/// Solved set and attempt log. Mutated in memory, flushed with `ProgressStore::save`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressDocument {
    /// Each id at most once; kept as a list so the file stays stable across saves
    #[serde(default)]
    pub solved: Vec<String>,
    #[serde(default)]
    pub attempts: Vec<Attempt>,
}

impl ProgressDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the id was not already solved.
    pub fn mark_solved(&mut self, problem_id: &str) -> bool {
        if self.is_solved(problem_id) {
            return false;
        }
        self.solved.push(problem_id.to_string());
        true
    }

    pub fn unmark_solved(&mut self, problem_id: &str) -> bool {
        let before = self.solved.len();
        self.solved.retain(|id| id != problem_id);
        before != self.solved.len()
    }

    pub fn is_solved(&self, problem_id: &str) -> bool {
        self.solved.iter().any(|id| id == problem_id)
    }

    pub fn solved_count(&self) -> usize {
        self.solved.len()
    }

    /// Appends with the current local time. Never deduplicates.
    pub fn log_attempt(&mut self, problem_id: &str, notes: &str) {
        self.attempts.push(Attempt {
            id: problem_id.to_string(),
            ts: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            notes: notes.to_string(),
        });
    }

    pub fn attempts_for<'a>(&'a self, problem_id: &'a str) -> impl Iterator<Item = &'a Attempt> + 'a {
        self.attempts.iter().filter(move |a| a.id == problem_id)
    }

    /// Drop repeated solved ids, keeping the first occurrence.
    pub(crate) fn normalize(&mut self) {
        let mut seen = HashSet::new();
        self.solved.retain(|id| seen.insert(id.clone()));
    }
}
