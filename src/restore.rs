//! Restore engine: copy a backup session back into the project tree.
//!
//! Restoring merges: files in the session overwrite files with the same
//! relative path, files that only exist in the project are left alone.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::component::Category;
use crate::copy;
use crate::error::Precondition;
use crate::outcome::Outcome;
use crate::workspace::Workspace;

/// A backup session found under the backup root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub name: String,
    pub path: PathBuf,
    /// Category folders present in the session
    pub categories: Vec<Category>,
    pub modified: Option<DateTime<Local>>,
}

impl std::fmt::Display for SessionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// List backup sessions, newest first.
///
/// A missing backup root yields an empty list.
pub fn list_sessions(workspace: &Workspace) -> Result<Vec<SessionInfo>> {
    let backup_root = workspace.backup_root();
    if !backup_root.exists() {
        return Ok(Vec::new());
    }

    let mut sessions = Vec::new();
    for entry in fs::read_dir(&backup_root)
        .with_context(|| format!("Failed to read directory: {}", backup_root.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!("Skipping backup with non UTF-8 name: {}", path.display());
            continue;
        };

        // Category folders present in this session
        let categories = Category::RESTORE_ORDER
            .iter()
            .copied()
            .filter(|c| path.join(c.dir_name()).is_dir())
            .collect();
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);

        sessions.push(SessionInfo {
            name,
            path,
            categories,
            modified,
        });
    }

    // Newest first, name as tie breaker
    sessions.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.name.cmp(&a.name)));
    Ok(sessions)
}

/// What a restore copied back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    pub session: String,
    pub categories: Vec<Category>,
    pub files_restored: usize,
}

impl RestoreReport {
    pub fn to_outcome(&self, workspace: &Workspace) -> Outcome {
        Outcome::info(format!(
            "Backup \"{}\" restored successfully ({} files)",
            self.session, self.files_restored
        ))
        .with_path(workspace.source_root())
    }
}

/// Reject names that would escape the backup root
fn validate_session_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if name.is_empty() || !single_normal || name.contains(['/', '\\']) {
        return Err(Precondition::InvalidSessionName(name.to_string()).into());
    }
    Ok(())
}

/// Copy every category folder of `session` back into `force-app/main/default`
pub fn restore_session(workspace: &Workspace, session: &str) -> Result<RestoreReport> {
    validate_session_name(session)?;

    let backup_root = workspace.backup_root();
    if !backup_root.is_dir() {
        return Err(Precondition::NoBackups(backup_root).into());
    }

    let session_dir = workspace.session_dir(session);
    if !session_dir.is_dir() {
        return Err(Precondition::SessionNotFound(session.to_string()).into());
    }

    let mut categories = Vec::new();
    let mut files_restored = 0;

    for category in Category::RESTORE_ORDER {
        let source = session_dir.join(category.dir_name());
        if !source.exists() {
            continue;
        }

        // Merge copy: stale project files are never removed
        files_restored += copy::copy_dir_recursive(&source, &workspace.source_dir(category))
            .with_context(|| format!("Failed to restore {category} from \"{session}\""))?;
        categories.push(category);
    }

    log::info!("Restored {files_restored} files from {}", session_dir.display());

    Ok(RestoreReport {
        session: session.to_string(),
        categories,
        files_restored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_session_name() {
        assert!(validate_session_name("2025-01-01_00-00-00").is_ok());
        assert!(validate_session_name("pre-deploy_2025-01-01_00-00-00").is_ok());

        for bad in ["", ".", "..", "../etc", "a/b", "a\\b", "/abs"] {
            let err = validate_session_name(bad).unwrap_err();
            assert!(crate::error::is_precondition(&err), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_list_sessions_missing_root() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::open(temp.path()).unwrap();
        assert!(list_sessions(&ws).unwrap().is_empty());
    }

    #[test]
    fn test_list_sessions_skips_files_and_reports_categories() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::open(temp.path()).unwrap();
        let session = ws.session_dir("one");
        fs::create_dir_all(session.join("classes")).unwrap();
        fs::create_dir_all(session.join("aura")).unwrap();
        fs::write(ws.backup_root().join("notes.txt"), "stray file").unwrap();

        let sessions = list_sessions(&ws).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].name, "one");
        assert_eq!(sessions[0].categories, vec![Category::Classes, Category::Aura]);
    }

    #[test]
    fn test_restore_unknown_session() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::open(temp.path()).unwrap();
        fs::create_dir_all(ws.backup_root()).unwrap();

        let err = restore_session(&ws, "missing").unwrap_err();
        assert_eq!(
            err.downcast_ref::<Precondition>(),
            Some(&Precondition::SessionNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_restore_without_backup_root() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::open(temp.path()).unwrap();

        let err = restore_session(&ws, "any").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Precondition>(),
            Some(Precondition::NoBackups(_))
        ));
    }
}
