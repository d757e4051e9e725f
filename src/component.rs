//! Component classification.
//!
//! A path is classified by the category folder names it contains. Bundle
//! categories (`lwc`, `aura`) must appear as a whole path segment; file
//! categories (`classes`, `triggers`) match anywhere in the path string, so a
//! folder such as `classes-utils` also counts as `classes`.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::sidecar;

/// A recognized component category folder under `force-app/main/default`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Classes,
    Triggers,
    Lwc,
    Aura,
}

impl Category {
    /// Order in which classification tests the categories
    pub const CLASSIFY_ORDER: [Category; 4] = [
        Category::Lwc,
        Category::Aura,
        Category::Classes,
        Category::Triggers,
    ];

    /// Order in which an "all components" backup copies the categories
    pub const BACKUP_ORDER: [Category; 4] = [
        Category::Classes,
        Category::Triggers,
        Category::Lwc,
        Category::Aura,
    ];

    /// Order in which a restore copies the categories back
    pub const RESTORE_ORDER: [Category; 4] = [
        Category::Classes,
        Category::Lwc,
        Category::Aura,
        Category::Triggers,
    ];

    /// Folder name of the category
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Classes => "classes",
            Category::Triggers => "triggers",
            Category::Lwc => "lwc",
            Category::Aura => "aura",
        }
    }

    /// Bundle categories are copied as whole directories
    pub fn is_bundle(&self) -> bool {
        matches!(self, Category::Lwc | Category::Aura)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The kind of component a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Class,
    Trigger,
    LightningWebComponent,
    AuraComponent,
    Unrecognized,
}

impl ComponentType {
    pub fn category(&self) -> Option<Category> {
        match self {
            ComponentType::Class => Some(Category::Classes),
            ComponentType::Trigger => Some(Category::Triggers),
            ComponentType::LightningWebComponent => Some(Category::Lwc),
            ComponentType::AuraComponent => Some(Category::Aura),
            ComponentType::Unrecognized => None,
        }
    }

    pub fn is_bundle(&self) -> bool {
        self.category().is_some_and(|c| c.is_bundle())
    }
}

impl From<Category> for ComponentType {
    fn from(category: Category) -> Self {
        match category {
            Category::Classes => ComponentType::Class,
            Category::Triggers => ComponentType::Trigger,
            Category::Lwc => ComponentType::LightningWebComponent,
            Category::Aura => ComponentType::AuraComponent,
        }
    }
}

/// Classify a file or folder path; the first matching category wins
pub fn classify(path: &Path) -> ComponentType {
    let full = path.to_string_lossy();

    for category in Category::CLASSIFY_ORDER {
        // lwc and aura must be a folder name; classes and triggers may appear anywhere
        let matched = if category.is_bundle() {
            has_segment(path, category.dir_name())
        } else {
            full.contains(category.dir_name())
        };
        if matched {
            return category.into();
        }
    }

    ComponentType::Unrecognized
}

fn has_segment(path: &Path, name: &str) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(segment) if segment == name))
}

/// A classified filesystem object and the unit in which it is copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentUnit {
    /// A single file, paired with its `-meta.xml` sidecar when one exists
    File {
        path: PathBuf,
        sidecar: Option<PathBuf>,
    },
    /// A bundle folder copied as a whole
    Directory { path: PathBuf },
}

impl ComponentUnit {
    /// Resolve the unit an active file belongs to.
    ///
    /// Files of bundle types resolve to their containing folder; everything
    /// else stays a single file.
    pub fn resolve(active_file: &Path, component_type: ComponentType) -> Self {
        if component_type.is_bundle() {
            if let Some(parent) = active_file.parent() {
                return ComponentUnit::Directory {
                    path: parent.to_path_buf(),
                };
            }
        }

        ComponentUnit::File {
            path: active_file.to_path_buf(),
            sidecar: sidecar::resolve_sidecar(active_file),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ComponentUnit::File { path, .. } => path,
            ComponentUnit::Directory { path } => path,
        }
    }
}
