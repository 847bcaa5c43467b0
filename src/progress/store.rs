use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::error::DrillError;
use crate::progress::ProgressDocument;

/// Write `contents` to `<path>.tmp`, fsync, then rename over `path`.
/// Readers either see the old file or the complete new one.
pub(crate) fn atomic_write(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    {
        let mut file = File::create(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

/// The progress file. Single writer assumed; the last rename wins.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ProgressStore { path: path.into() }
    }

    /// Missing or corrupt state re-initializes to the empty document.
    pub fn load(&self) -> ProgressDocument {
        let path = &self.path;
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<ProgressDocument>(&data) {
                Ok(mut doc) => {
                    doc.normalize();
                    doc
                }
                Err(e) => {
                    tracing::warn!(
                        path = ?path,
                        error = %e,
                        "Failed to parse progress file, using defaults"
                    );
                    ProgressDocument::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?path, "No progress file yet, using defaults");
                ProgressDocument::default()
            }
            Err(e) => {
                tracing::warn!(
                    path = ?path,
                    error = %e,
                    "Failed to read progress file, using defaults"
                );
                ProgressDocument::default()
            }
        }
    }

    pub fn save(&self, doc: &ProgressDocument) -> Result<(), DrillError> {
        let json = serde_json::to_string_pretty(doc)?;

        atomic_write(&self.path, json.as_bytes())
            .map_err(|e| DrillError::persistence(
                format!("Failed to write progress file: {}", e)
            ).with_context(format!("path: {:?}", self.path)).with_source("std::io"))?;

        tracing::debug!(path = ?self.path, solved = doc.solved.len(), attempts = doc.attempts.len(), "Saved progress");
        Ok(())
    }
}
