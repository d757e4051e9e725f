//! Delete the whole backup root. There is no per-session deletion.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::outcome::Outcome;
use crate::workspace::Workspace;

/// Warning shown before the backup root is deleted
pub const DELETE_WARNING: &str = "This will permanently delete all backups. Are you sure?";

/// Result of a prune request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneReport {
    /// The backup root did not exist
    NothingToDelete,
    /// The user declined the confirmation
    Declined,
    Deleted { backup_root: PathBuf, sessions: usize },
}

impl PruneReport {
    pub fn to_outcome(&self) -> Outcome {
        match self {
            PruneReport::NothingToDelete => Outcome::info("No backups found to delete."),
            PruneReport::Declined => Outcome::info("Deletion cancelled, backups kept."),
            PruneReport::Deleted {
                backup_root,
                sessions,
            } => Outcome::info(format!("All backups deleted ({sessions} sessions)."))
                .with_path(backup_root),
        }
    }
}

/// Delete `<workspace>/SFClone Backup` once `confirmed` is true
pub fn delete_backups(workspace: &Workspace, confirmed: bool) -> Result<PruneReport> {
    let backup_root = workspace.backup_root();
    if !backup_root.exists() {
        return Ok(PruneReport::NothingToDelete);
    }

    if !confirmed {
        return Ok(PruneReport::Declined);
    }

    // Count before deleting, for the report only
    let sessions = fs::read_dir(&backup_root)
        .with_context(|| format!("Failed to read directory: {}", backup_root.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .count();

    fs::remove_dir_all(&backup_root)
        .with_context(|| format!("Failed to delete {}", backup_root.display()))?;
    log::info!("Deleted backup root {} ({sessions} sessions)", backup_root.display());

    Ok(PruneReport::Deleted {
        backup_root,
        sessions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_nothing_to_delete() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::open(temp.path()).unwrap();

        let report = delete_backups(&ws, true).unwrap();
        assert_eq!(report, PruneReport::NothingToDelete);
        assert!(report.to_outcome().success);
    }

    #[test]
    fn test_declined_keeps_backups() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::open(temp.path()).unwrap();
        fs::create_dir_all(ws.session_dir("s1")).unwrap();

        assert_eq!(delete_backups(&ws, false).unwrap(), PruneReport::Declined);
        assert!(ws.session_dir("s1").exists());
    }

    #[test]
    fn test_confirmed_deletes_everything() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::open(temp.path()).unwrap();
        fs::create_dir_all(ws.session_dir("s1").join("classes")).unwrap();
        fs::write(ws.session_dir("s1").join("classes").join("A.cls"), "a").unwrap();
        fs::create_dir_all(ws.session_dir("s2")).unwrap();

        let report = delete_backups(&ws, true).unwrap();
        assert_eq!(
            report,
            PruneReport::Deleted {
                backup_root: ws.backup_root(),
                sessions: 2
            }
        );
        assert!(!ws.backup_root().exists());
    }
}
