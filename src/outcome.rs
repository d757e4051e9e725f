use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How an outcome is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation succeeded or there was nothing to do
    Info,
    /// Operation succeeded with a caveat, or needs confirmation
    Warning,
    /// Operation was aborted
    Error,
}

/// Result of one user-triggered operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Outcome {
    pub fn info(message: impl Into<String>) -> Self {
        Outcome {
            success: true,
            severity: Severity::Info,
            message: message.into(),
            path: None,
        }
    }

    /// A successful outcome the user should still pay attention to
    pub fn warning(message: impl Into<String>) -> Self {
        Outcome {
            success: true,
            severity: Severity::Warning,
            message: message.into(),
            path: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Outcome {
            success: false,
            severity: Severity::Error,
            message: message.into(),
            path: None,
        }
    }

    /// Build an error outcome from an error chain, keeping every cause
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self::error(format!("{err:#}"))
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Print the outcome for a terminal user
    pub fn display(&self) {
        let line = format!("SFClone: {}", self.message);
        match self.severity {
            Severity::Info => println!("{} {}", "✓".green(), line),
            Severity::Warning => println!("{} {}", "!".yellow(), line.yellow()),
            Severity::Error => eprintln!("{} {}", "✗".red(), line.red()),
        }
    }
}
