//! Clone engine: duplicate a component next to the original.
//!
//! Files inside an `lwc` or `aura` folder clone the whole bundle folder (top
//! level files only) into `<folder><suffix>`. Any other file is cloned on its
//! own, together with its `-meta.xml` sidecar when one exists.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::component::{classify, ComponentType};
use crate::copy;
use crate::error::Precondition;
use crate::outcome::Outcome;
use crate::sidecar::{self, SIDECAR_SUFFIX};
use crate::workspace::resolve_active_file;

/// What a clone produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneReport {
    /// A single file (and maybe its sidecar) was cloned
    File {
        destination: PathBuf,
        sidecar: Option<PathBuf>,
    },
    /// A bundle folder was cloned
    Bundle {
        component_type: ComponentType,
        destination: PathBuf,
        files_copied: usize,
    },
}

impl CloneReport {
    pub fn destination(&self) -> &Path {
        match self {
            CloneReport::File { destination, .. } => destination,
            CloneReport::Bundle { destination, .. } => destination,
        }
    }

    pub fn to_outcome(&self) -> Outcome {
        let name = self
            .destination()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let message = match self {
            CloneReport::File { sidecar: Some(_), .. } => {
                format!("Created clone {name} (with metadata file)")
            }
            CloneReport::File { sidecar: None, .. } => format!("Created clone {name}"),
            CloneReport::Bundle { files_copied, .. } => {
                format!("Folder cloned to {name} ({files_copied} files)")
            }
        };

        Outcome::info(message).with_path(self.destination())
    }
}

/// Rename a file inside a cloned bundle.
///
/// The suffix goes right before the last extension; for sidecars it goes
/// before the owning file's extension (`Foo.cls-meta.xml` becomes
/// `Foo-clone.cls-meta.xml`). Names without any extension are kept as is.
pub fn bundle_clone_name(file_name: &str, suffix: &str) -> String {
    if !file_name.contains('.') {
        return file_name.to_string();
    }

    if let Some(owner) = file_name.strip_suffix(SIDECAR_SUFFIX) {
        return match owner.rsplit_once('.') {
            Some((stem, ext)) => format!("{stem}{suffix}.{ext}{SIDECAR_SUFFIX}"),
            None => format!("{owner}{suffix}{SIDECAR_SUFFIX}"),
        };
    }

    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}{suffix}.{ext}"),
        None => file_name.to_string(),
    }
}

/// Name of a standalone file clone: `<stem><suffix><ext>`.
///
/// Sidecar files keep the sidecar pairing, same as in a bundle.
pub fn file_clone_name(file_name: &str, suffix: &str) -> String {
    if file_name.ends_with(SIDECAR_SUFFIX) && file_name.len() > SIDECAR_SUFFIX.len() {
        return bundle_clone_name(file_name, suffix);
    }

    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());

    match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    }
}

/// Clone the component the active file belongs to
pub fn clone_component(active_file: &Path, suffix: &str) -> Result<CloneReport> {
    // Segment matching needs the full path, not just what the user typed
    let active_file = &resolve_active_file(active_file)?;
    if !active_file.is_file() {
        return Err(Precondition::NoActiveFile(active_file.to_path_buf()).into());
    }

    let folder = active_file
        .parent()
        .context("Active file has no parent folder")?;

    // Bundle types are decided by the folder, not the file
    let component_type = classify(folder);
    let report = if component_type.is_bundle() {
        clone_bundle(folder, component_type, suffix)?
    } else {
        clone_file(active_file, suffix)?
    };

    log::info!("Cloned {} to {}", active_file.display(), report.destination().display());
    Ok(report)
}

fn clone_bundle(folder: &Path, component_type: ComponentType, suffix: &str) -> Result<CloneReport> {
    let folder_name = file_name_str(folder)?;
    let parent = folder
        .parent()
        .with_context(|| format!("Bundle folder has no parent: {}", folder.display()))?;
    let destination = parent.join(format!("{folder_name}{suffix}"));

    fs::create_dir_all(&destination)
        .with_context(|| format!("Failed to create directory: {}", destination.display()))?;

    let mut entries = fs::read_dir(folder)
        .with_context(|| format!("Failed to read directory: {}", folder.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read directory: {}", folder.display()))?;
    entries.sort_by_key(|e| e.file_name());

    // Sorted so a failure always leaves the same prefix of files behind
    let mut files_copied = 0;
    for entry in entries {
        let source = entry.path();
        // Nested folders are not part of a bundle clone
        if !source.is_file() {
            continue;
        }

        let name = file_name_str(&source)?;
        let target = destination.join(bundle_clone_name(name, suffix));
        copy::copy_file(&source, &target)?;
        files_copied += 1;
    }

    Ok(CloneReport::Bundle {
        component_type,
        destination,
        files_copied,
    })
}

fn clone_file(active_file: &Path, suffix: &str) -> Result<CloneReport> {
    let name = file_name_str(active_file)?;
    // Clone sits next to the original
    let destination = active_file.with_file_name(file_clone_name(name, suffix));

    let sidecar = sidecar::copy_with_sidecar(active_file, &destination)?;

    Ok(CloneReport::File {
        destination,
        sidecar,
    })
}

fn file_name_str(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Unsupported file name: {}", path.display()))
}
