use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::DrillError;
use crate::perf::PerfTimer;
use crate::problems::problem::{is_safe_id, Problem};

/// What to do when a definition file cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Abort the whole load on the first bad file
    #[default]
    Strict,
    /// Warn, skip the file and keep going
    Lenient,
}

/// Loads the problem bank from a directory of YAML files.
/// Nothing is cached: every `load` re-reads the directory.
#[derive(Debug, Clone)]
pub struct ProblemStore {
    dir: PathBuf,
    policy: LoadPolicy,
}

fn is_definition_file(path: &Path) -> bool {
    path.is_file()
        && matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        )
}

/// Parse one definition file's text into zero or more records.
/// The document may be a list of records, a single record, or empty.
pub fn parse_definitions(content: &str) -> Result<Vec<Problem>, serde_yaml::Error> {
    let blank = content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'));
    if blank {
        return Ok(Vec::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    if value.is_null() {
        Ok(Vec::new())
    } else if value.is_sequence() {
        serde_yaml::from_value(value)
    } else {
        Ok(vec![serde_yaml::from_value::<Problem>(value)?])
    }
}

impl ProblemStore {
    pub fn new<P: Into<PathBuf>>(dir: P, policy: LoadPolicy) -> Self {
        ProblemStore { dir: dir.into(), policy }
    }

    fn definition_files(&self) -> Result<Vec<PathBuf>, DrillError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(dir = ?self.dir, "Problems directory not found, bank is empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(DrillError::load(format!("Failed to read problems directory: {}", e))
                    .with_context(format!("path: {:?}", self.dir))
                    .with_source("std::io"));
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| DrillError::load(format!("Failed to list problems directory: {}", e))
                    .with_context(format!("path: {:?}", self.dir)))?
                .path();
            if is_definition_file(&path) {
                files.push(path);
            }
        }
        // read_dir order is platform dependent
        files.sort();
        Ok(files)
    }

    fn load_file(path: &Path) -> Result<Vec<Problem>, DrillError> {
        let content = fs::read_to_string(path)
            .map_err(|e| DrillError::load(format!("Failed to read definition file: {}", e))
                .with_context(format!("path: {:?}", path))
                .with_source("std::io"))?;
        parse_definitions(&content)
            .map_err(|e| DrillError::load(format!("Failed to parse definition file: {}", e))
                .with_context(format!("path: {:?}", path))
                .with_source("serde_yaml"))
    }

    /// Read every definition file and concatenate the records in filename order.
    pub fn load(&self) -> Result<Vec<Problem>, DrillError> {
        let _perf = PerfTimer::new("problem_store_load");
        let mut problems: Vec<Problem> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for path in self.definition_files()? {
            let records = match Self::load_file(&path) {
                Ok(records) => records,
                Err(e) if self.policy == LoadPolicy::Lenient => {
                    tracing::warn!(path = ?path, error = %e, "Skipping unparsable definition file");
                    continue;
                }
                Err(e) => return Err(e),
            };

            for problem in records {
                if !is_safe_id(&problem.id) {
                    match self.policy {
                        LoadPolicy::Strict => {
                            return Err(DrillError::load(format!("Invalid problem id '{}'", problem.id))
                                .with_context(format!("path: {:?}", path)));
                        }
                        LoadPolicy::Lenient => {
                            tracing::warn!(id = %problem.id, path = ?path, "Skipping problem with invalid id");
                            continue;
                        }
                    }
                }
                if seen.insert(problem.id.clone()) {
                    problems.push(problem);
                    continue;
                }
                match self.policy {
                    LoadPolicy::Strict => {
                        return Err(DrillError::load(format!("Duplicate problem id '{}'", problem.id))
                            .with_context(format!("path: {:?}", path)));
                    }
                    LoadPolicy::Lenient => {
                        tracing::warn!(id = %problem.id, path = ?path, "Duplicate problem id, keeping first");
                    }
                }
            }
        }

        tracing::debug!(dir = ?self.dir, count = problems.len(), "Loaded problem bank");
        Ok(problems)
    }
}

pub fn find_by_id<'a>(problems: &'a [Problem], id: &str) -> Option<&'a Problem> {
    problems.iter().find(|p| p.id == id)
}

/// Sorted distinct categories.
pub fn categories(problems: &[Problem]) -> Vec<String> {
    problems
        .iter()
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted distinct topics.
pub fn topics(problems: &[Problem]) -> Vec<String> {
    problems
        .iter()
        .map(|p| p.topic.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
