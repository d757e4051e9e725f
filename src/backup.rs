//! Backup engine: copy components into a timestamped session folder.
//!
//! Sessions live in `<workspace>/SFClone Backup/<session>/<category>/...`.
//! After every successful backup the workspace `.gitignore` is made to
//! contain `/SFClone Backup/`.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::component::{classify, Category, ComponentUnit};
use crate::copy;
use crate::error::Precondition;
use crate::outcome::Outcome;
use crate::settings::Settings;
use crate::sidecar;
use crate::workspace::{resolve_active_file, Workspace, IGNORE_ENTRY};

/// Timestamp layout of session folder names
pub const SESSION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// What to back up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupMode {
    /// The component the given file belongs to
    Current(PathBuf),
    /// Every category folder under `force-app/main/default`
    All,
}

impl std::fmt::Display for BackupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackupMode::Current(_) => write!(f, "Backup current file or component"),
            BackupMode::All => write!(f, "Backup all components (classes, triggers, lwc, aura)"),
        }
    }
}

/// Parameters of one backup invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOptions {
    pub mode: BackupMode,
    pub label: Option<String>,
}

/// How the `.gitignore` post-condition was satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreUpdate {
    AlreadyPresent,
    Appended,
    Created,
    /// Best-effort update failed; the backup itself succeeded
    Failed(String),
}

/// What a backup produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    pub session_dir: PathBuf,
    pub categories: Vec<Category>,
    pub files_copied: usize,
    pub ignore: IgnoreUpdate,
}

impl BackupReport {
    pub fn to_outcome(&self) -> Outcome {
        let location = self.session_dir.display();

        let outcome = if self.categories.is_empty() {
            Outcome::warning(format!(
                "No component folders found under force-app/main/default, nothing backed up to {location}"
            ))
        } else if let IgnoreUpdate::Failed(reason) = &self.ignore {
            Outcome::warning(format!(
                "Backup created at {location}, but .gitignore could not be updated: {reason}"
            ))
        } else {
            Outcome::info(format!("Backup created at {location}"))
        };

        outcome.with_path(&self.session_dir)
    }
}

/// Replace every character outside `[A-Za-z0-9_-]` with `-`
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Session folder name: `<label>_<timestamp>` or just `<timestamp>`
pub fn session_name(label: Option<&str>, now: DateTime<Local>) -> String {
    let timestamp = now.format(SESSION_TIMESTAMP_FORMAT).to_string();

    // An empty label means no label; whitespace is sanitized like anything else
    match label.filter(|l| !l.is_empty()) {
        Some(label) => format!("{}_{timestamp}", sanitize_label(label)),
        None => timestamp,
    }
}

/// Run a backup using the current local time for the session name
pub fn create_backup(
    workspace: &Workspace,
    options: &BackupOptions,
    settings: &Settings,
) -> Result<BackupReport> {
    create_backup_at(workspace, options, settings, Local::now())
}

/// Run a backup with an explicit session timestamp
pub fn create_backup_at(
    workspace: &Workspace,
    options: &BackupOptions,
    settings: &Settings,
    now: DateTime<Local>,
) -> Result<BackupReport> {
    let session_dir = workspace.session_dir(&session_name(options.label.as_deref(), now));

    let (categories, files_copied) = match &options.mode {
        BackupMode::All => backup_all(workspace, &session_dir, settings)?,
        BackupMode::Current(active_file) => backup_current(active_file, &session_dir)?,
    };

    log::info!(
        "Backed up {} files ({}) to {}",
        files_copied,
        categories
            .iter()
            .map(|c| c.dir_name())
            .collect::<Vec<_>>()
            .join(", "),
        session_dir.display()
    );

    // Only reached once the copy succeeded
    let ignore = match ensure_ignored(workspace) {
        Ok(update) => update,
        Err(e) if !settings.strict_ignore_update => {
            log::warn!("Failed to update {}: {:#}", workspace.ignore_file().display(), e);
            IgnoreUpdate::Failed(format!("{e:#}"))
        }
        Err(e) => return Err(e),
    };

    Ok(BackupReport {
        session_dir,
        categories,
        files_copied,
        ignore,
    })
}

fn backup_all(
    workspace: &Workspace,
    session_dir: &Path,
    settings: &Settings,
) -> Result<(Vec<Category>, usize)> {
    let mut categories = Vec::new();
    let mut files_copied = 0;

    for category in settings.backup_categories() {
        let source = workspace.source_dir(category);
        if !source.exists() {
            log::debug!("Skipping missing {}", source.display());
            continue;
        }

        // Sidecars sit next to their owners, so the tree copy carries them
        files_copied += copy::copy_dir_recursive(&source, &session_dir.join(category.dir_name()))
            .with_context(|| format!("Failed to back up {category}"))?;
        categories.push(category);
    }

    Ok((categories, files_copied))
}

fn backup_current(active_file: &Path, session_dir: &Path) -> Result<(Vec<Category>, usize)> {
    let active_file = &resolve_active_file(active_file)?;
    if !active_file.is_file() {
        return Err(Precondition::NoActiveFile(active_file.to_path_buf()).into());
    }

    // Unrecognized files abort before the session folder exists
    let component_type = classify(active_file);
    let category = component_type
        .category()
        .ok_or_else(|| Precondition::UnrecognizedComponent(active_file.to_path_buf()))?;
    let category_dir = session_dir.join(category.dir_name());

    let files_copied = match ComponentUnit::resolve(active_file, component_type) {
        ComponentUnit::Directory { path } => {
            let name = path
                .file_name()
                .with_context(|| format!("Bundle folder has no name: {}", path.display()))?;
            copy::copy_dir_recursive(&path, &category_dir.join(name))?
        }
        ComponentUnit::File { path, .. } => {
            let name = path
                .file_name()
                .with_context(|| format!("File has no name: {}", path.display()))?;
            let copied_sidecar = sidecar::copy_with_sidecar(&path, &category_dir.join(name))?;
            1 + usize::from(copied_sidecar.is_some())
        }
    };

    Ok((vec![category], files_copied))
}

/// Make sure the workspace `.gitignore` lists the backup root
pub fn ensure_ignored(workspace: &Workspace) -> Result<IgnoreUpdate> {
    let path = workspace.ignore_file();

    if !path.exists() {
        fs::write(&path, format!("{IGNORE_ENTRY}\n"))
            .with_context(|| format!("Failed to create {}", path.display()))?;
        return Ok(IgnoreUpdate::Created);
    }

    // Substring check, so a commented or indented entry also counts
    let current = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if current.contains(IGNORE_ENTRY) {
        return Ok(IgnoreUpdate::AlreadyPresent);
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    write!(file, "\n{IGNORE_ENTRY}")
        .with_context(|| format!("Failed to append to {}", path.display()))?;

    Ok(IgnoreUpdate::Appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap()
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("pre deploy!"), "pre-deploy-");
        assert_eq!(sanitize_label("release_1-2"), "release_1-2");
        assert_eq!(sanitize_label("a/b\\c.d"), "a-b-c-d");
        assert_eq!(sanitize_label("café"), "caf-");
    }

    #[test]
    fn test_session_name_without_label() {
        assert_eq!(session_name(None, fixed_time()), "2025-03-07_09-05-02");
        assert_eq!(session_name(Some(""), fixed_time()), "2025-03-07_09-05-02");
    }

    #[test]
    fn test_session_name_keeps_surrounding_whitespace_as_dashes() {
        assert_eq!(session_name(Some(" x"), fixed_time()), "-x_2025-03-07_09-05-02");
        assert_eq!(session_name(Some("  "), fixed_time()), "--_2025-03-07_09-05-02");
    }

    #[test]
    fn test_session_name_with_label() {
        assert_eq!(
            session_name(Some("pre deploy!"), fixed_time()),
            "pre-deploy-_2025-03-07_09-05-02"
        );
    }

    #[test]
    fn test_ensure_ignored_creates_file() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::open(temp.path()).unwrap();

        assert_eq!(ensure_ignored(&ws).unwrap(), IgnoreUpdate::Created);
        assert_eq!(
            fs::read_to_string(ws.ignore_file()).unwrap(),
            "/SFClone Backup/\n"
        );
    }

    #[test]
    fn test_ensure_ignored_appends_once() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::open(temp.path()).unwrap();
        fs::write(ws.ignore_file(), "node_modules/\n.sfdx/").unwrap();

        assert_eq!(ensure_ignored(&ws).unwrap(), IgnoreUpdate::Appended);
        assert_eq!(ensure_ignored(&ws).unwrap(), IgnoreUpdate::AlreadyPresent);

        let content = fs::read_to_string(ws.ignore_file()).unwrap();
        assert_eq!(content, "node_modules/\n.sfdx/\n/SFClone Backup/");
        assert_eq!(content.matches(IGNORE_ENTRY).count(), 1);
    }

    #[test]
    fn test_report_outcome_warns_on_ignore_failure() {
        let report = BackupReport {
            session_dir: PathBuf::from("/ws/SFClone Backup/x"),
            categories: vec![Category::Classes],
            files_copied: 2,
            ignore: IgnoreUpdate::Failed("read-only".to_string()),
        };
        let outcome = report.to_outcome();
        assert!(outcome.success);
        assert_eq!(outcome.severity, crate::outcome::Severity::Warning);
        assert!(outcome.message.contains("read-only"));
    }
}
