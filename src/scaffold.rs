use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::error::DrillError;
use crate::problems::problem::{is_safe_id, Problem};
use crate::progress::store::atomic_write;

const SOLUTION_EXT: &str = "py";

fn suggested_imports(problem: &Problem) -> Vec<&'static str> {
    let category = problem.category.as_str();
    let topic = problem.topic.as_str();

    if category == "pandas" || topic == "pandas" {
        vec!["import pandas as pd"]
    } else if matches!(category, "single_cell" | "spatial") || matches!(topic, "scanpy" | "squidpy") {
        let mut imports = vec!["import scanpy as sc"];
        if topic == "squidpy" {
            imports.push("import squidpy as sq");
        }
        imports
    } else {
        vec!["# import needed modules"]
    }
}

/// Starter file: a docstring header describing the task, imports, and a `main()` template.
pub fn solution_stub(problem: &Problem) -> String {
    let header = format!(
        r#""""
{id}: {title}

Category: {category}
Topic: {topic}
Tags: {tags}

Task:
{desc}
"""

"#,
        id = problem.id,
        title = problem.title,
        category = problem.category,
        topic = problem.topic,
        tags = problem.tags_joined(),
        desc = problem.description.trim(),
    );

    let body = format!(
        "{}\n\n\n\
         def main():\n    \
             # TODO: implement your solution\n    \
             pass\n\n\n\
         if __name__ == '__main__':\n    \
             main()\n",
        suggested_imports(problem).join("\n")
    );

    header + &body
}

/// Writes solution files under one directory, one per problem id.
#[derive(Debug, Clone)]
pub struct Scaffolder {
    dir: PathBuf,
}

impl Scaffolder {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Scaffolder { dir: dir.into() }
    }

    /// Path of the solution file for `problem_id`. Ids that could leave the directory are refused.
    pub fn solution_path(&self, problem_id: &str) -> Result<PathBuf, DrillError> {
        if !is_safe_id(problem_id) {
            return Err(DrillError::scaffold(format!("Invalid problem id '{}'", problem_id))
                .with_context(format!("dir: {:?}", self.dir)));
        }
        Ok(self.dir.join(format!("{}.{}", problem_id, SOLUTION_EXT)))
    }

    /// Create the starter file if it does not exist yet. An existing file is left untouched.
    pub fn ensure(&self, problem: &Problem) -> Result<PathBuf, DrillError> {
        let path = self.solution_path(&problem.id)?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| DrillError::scaffold(format!("Failed to create solutions directory: {}", e))
                .with_context(format!("path: {:?}", self.dir)))?;

        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = ?path, "Solution file already exists");
                return Ok(path);
            }
            Err(e) => {
                return Err(DrillError::scaffold(format!("Failed to create solution file: {}", e))
                    .with_context(format!("path: {:?}", path)));
            }
        };

        fill_new_file(file, &path, solution_stub(problem).as_bytes())?;

        tracing::info!(path = ?path, id = %problem.id, "Created solution file");
        Ok(path)
    }

    /// Overwrite the solution for `problem_id` with the user's edited content.
    pub fn save(&self, problem_id: &str, content: &str) -> Result<PathBuf, DrillError> {
        let path = self.solution_path(problem_id)?;
        atomic_write(&path, content.as_bytes())
            .map_err(|e| DrillError::scaffold(format!("Failed to save solution: {}", e))
                .with_context(format!("path: {:?}", path)))?;
        tracing::info!(path = ?path, id = %problem_id, "Saved solution");
        Ok(path)
    }
}

/// Write into a file `ensure` just created. A partial file is removed on failure.
pub(crate) fn fill_new_file<W: Write>(mut file: W, path: &Path, contents: &[u8]) -> Result<(), DrillError> {
    if let Err(e) = file.write_all(contents).and_then(|_| file.flush()) {
        drop(file);
        let _ = std::fs::remove_file(path);
        return Err(DrillError::scaffold(format!("Failed to write solution file: {}", e))
            .with_context(format!("path: {:?}", path)));
    }
    Ok(())
}
