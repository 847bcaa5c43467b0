use serde::{Serialize, Deserialize};
use std::fmt;

/// Where in the pipeline an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorStage {
    /// A problem definition file could not be read or parsed
    Load,
    /// The progress file could not be written
    Persistence,
    /// A solution file could not be created or written
    Scaffold,
    Io,
}

impl ErrorStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStage::Load => "load",
            ErrorStage::Persistence => "persistence",
            ErrorStage::Scaffold => "scaffold",
            ErrorStage::Io => "io",
        }
    }
}

impl fmt::Display for ErrorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the whole crate.
/// Absence (no matching problem) is never an error; callers get `Option` or an empty `Vec`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillError {
    pub message: String,
    pub stage: ErrorStage,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl DrillError {
    /// Create a new error with stage and message
    pub fn new<S: Into<String>>(message: S, stage: ErrorStage) -> Self {
        DrillError {
            message: message.into(),
            stage,
            context: None,
            source: None,
        }
    }

    pub fn load<S: Into<String>>(message: S) -> Self {
        Self::new(message, ErrorStage::Load)
    }

    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::new(message, ErrorStage::Persistence)
    }

    pub fn scaffold<S: Into<String>>(message: S) -> Self {
        Self::new(message, ErrorStage::Scaffold)
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for DrillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for DrillError {}

impl From<std::io::Error> for DrillError {
    fn from(err: std::io::Error) -> Self {
        DrillError::new(
            format!("I/O error: {}", err),
            ErrorStage::Io
        ).with_source("std::io")
    }
}

impl From<serde_json::Error> for DrillError {
    fn from(err: serde_json::Error) -> Self {
        DrillError::new(
            format!("JSON error: {}", err),
            ErrorStage::Persistence
        ).with_source("serde_json")
    }
}

impl From<serde_yaml::Error> for DrillError {
    fn from(err: serde_yaml::Error) -> Self {
        DrillError::load(format!("YAML error: {}", err)).with_source("serde_yaml")
    }
}
