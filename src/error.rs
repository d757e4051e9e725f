use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort an operation before any filesystem I/O happens
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Precondition {
    #[error("Please open a component file: {} is not a file", .0.display())]
    NoActiveFile(PathBuf),

    #[error("Please open a workspace: {} is not a directory", .0.display())]
    NoWorkspace(PathBuf),

    #[error("Only Apex classes, triggers, LWC or Aura components are supported: {}", .0.display())]
    UnrecognizedComponent(PathBuf),

    #[error("No backups found in \"{}\"", .0.display())]
    NoBackups(PathBuf),

    #[error("Backup \"{0}\" does not exist")]
    SessionNotFound(String),

    #[error("Invalid backup name \"{0}\"")]
    InvalidSessionName(String),

    #[error("{0} (not running in an interactive terminal)")]
    NonInteractive(&'static str),
}

/// Returns true when the error chain carries a [`Precondition`]
pub fn is_precondition(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Precondition>().is_some()
}
