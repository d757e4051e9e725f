use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::component::Category;
use crate::error::Precondition;

/// Folder under the workspace root that holds every backup session
pub const BACKUP_ROOT_NAME: &str = "SFClone Backup";

/// Line that keeps the backup root out of version control
pub const IGNORE_ENTRY: &str = "/SFClone Backup/";

/// Ignore file maintained at the workspace root
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Source folders leading to the category folders
const SOURCE_SEGMENTS: [&str; 3] = ["force-app", "main", "default"];

/// Make an active-file path absolute against the current directory.
///
/// Classification looks at path segments, so `myCmp.js` typed from inside a
/// bundle folder has to become `.../lwc/myCmp/myCmp.js` first.
pub fn resolve_active_file(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::path::absolute(path)
        .with_context(|| format!("Failed to resolve path: {}", path.display()))
}

/// An opened project workspace and its fixed layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open a workspace rooted at `root`, which must be an existing directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Precondition::NoWorkspace(root.to_path_buf()).into());
        }
        Ok(Workspace {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/force-app/main/default`
    pub fn source_root(&self) -> PathBuf {
        SOURCE_SEGMENTS
            .iter()
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    /// `<root>/force-app/main/default/<category>`
    pub fn source_dir(&self, category: Category) -> PathBuf {
        self.source_root().join(category.dir_name())
    }

    /// `<root>/SFClone Backup`
    pub fn backup_root(&self) -> PathBuf {
        self.root.join(BACKUP_ROOT_NAME)
    }

    /// `<root>/SFClone Backup/<session>`
    pub fn session_dir(&self, session: &str) -> PathBuf {
        self.backup_root().join(session)
    }

    /// `<root>/.gitignore`
    pub fn ignore_file(&self) -> PathBuf {
        self.root.join(IGNORE_FILE_NAME)
    }
}
