use chrono::{Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use sha2::{Digest, Sha256};
use crate::problems::problem::Problem;

/// Independent optional predicates; an absent predicate matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub difficulty: Option<u32>,
    pub category: Option<String>,
    pub topic: Option<String>,
    /// OR-match: a problem passes if it carries any of these tags
    pub tags: Option<Vec<String>>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn topic<S: Into<String>>(mut self, topic: S) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn matches(&self, problem: &Problem) -> bool {
        if let Some(difficulty) = self.difficulty {
            if problem.difficulty != difficulty {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &problem.category != category {
                return false;
            }
        }
        if let Some(ref topic) = self.topic {
            if &problem.topic != topic {
                return false;
            }
        }
        match self.tags {
            Some(ref tags) if !tags.is_empty() => problem.has_any_tag(tags),
            _ => true,
        }
    }

    /// Canonical salt for the daily pick, so each filter combination gets its own problem of the day.
    pub fn salt(&self) -> String {
        fn or_any(value: Option<String>) -> String {
            value.unwrap_or_else(|| "any".to_string())
        }

        let tags = self
            .tags
            .as_ref()
            .filter(|t| !t.is_empty())
            .map(|t| {
                let mut sorted = t.clone();
                sorted.sort();
                sorted.join(",")
            });

        format!(
            "{}:{}:{}:{}",
            or_any(self.difficulty.map(|d| d.to_string())),
            or_any(self.category.clone()),
            or_any(self.topic.clone()),
            or_any(tags),
        )
    }
}

/// Stable-ordered subset of `problems` matching every supplied predicate.
pub fn filter(problems: &[Problem], filter: &Filter) -> Vec<Problem> {
    let filtered: Vec<Problem> = problems
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();

    if filtered.is_empty() && !problems.is_empty() {
        tracing::debug!(
            filter = ?filter,
            total_count = problems.len(),
            "No problems match filter"
        );
    }

    filtered
}

pub fn choose_random(problems: &[Problem]) -> Option<&Problem> {
    choose_random_with(problems, &mut rand::thread_rng())
}

pub fn choose_random_with<'a, R: Rng + ?Sized>(problems: &'a [Problem], rng: &mut R) -> Option<&'a Problem> {
    problems.choose(rng)
}

/// Index of the day's pick: SHA-256 of `"{date}::{salt}"`, first four digest bytes as a
/// big-endian integer, modulo `len`. `len` must be non-zero.
pub fn daily_index(date: NaiveDate, salt: &str, len: usize) -> usize {
    let key = format!("{}::{}", date.format("%Y-%m-%d"), salt);
    let digest = Sha256::digest(key.as_bytes());
    let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    prefix as usize % len
}

/// Same date and salt always give the same problem for the same collection.
pub fn choose_stable_daily<'a>(problems: &'a [Problem], salt: &str) -> Option<&'a Problem> {
    choose_stable_daily_on(problems, Local::now().date_naive(), salt)
}

pub fn choose_stable_daily_on<'a>(problems: &'a [Problem], date: NaiveDate, salt: &str) -> Option<&'a Problem> {
    if problems.is_empty() {
        return None;
    }
    let idx = daily_index(date, salt, problems.len());
    tracing::debug!(date = %date, salt = %salt, idx, "Daily pick");
    problems.get(idx)
}
