//! `-meta.xml` sidecar handling.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::copy;

/// Literal suffix appended to the owning file's path
pub const SIDECAR_SUFFIX: &str = "-meta.xml";

/// Extensions whose files always ship with a sidecar in a healthy project
const SIDECAR_EXTENSIONS: [&str; 2] = ["cls", "trigger"];

/// Path of the sidecar belonging to `path` (`<path>-meta.xml`)
pub fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// True for files that normally carry a sidecar (`.cls`, `.trigger`)
pub fn expects_sidecar(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SIDECAR_EXTENSIONS.contains(&e))
}

/// The sidecar of `path`, only if it is present on disk
pub fn resolve_sidecar(path: &Path) -> Option<PathBuf> {
    let candidate = sidecar_path(path);
    if candidate.is_file() {
        Some(candidate)
    } else {
        if expects_sidecar(path) {
            log::debug!("No sidecar found for {}", path.display());
        }
        None
    }
}

/// Copy a file and, if present, its sidecar to `dest` and `<dest>-meta.xml`.
///
/// Returns the sidecar destination when one was copied.
pub fn copy_with_sidecar(src: &Path, dest: &Path) -> Result<Option<PathBuf>> {
    copy::copy_file(src, dest)?;

    // A missing sidecar is normal, never fabricated
    let Some(sidecar) = resolve_sidecar(src) else {
        return Ok(None);
    };

    let sidecar_dest = sidecar_path(dest);
    fs::copy(&sidecar, &sidecar_dest).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            sidecar.display(),
            sidecar_dest.display()
        )
    })?;
    log::debug!("Copied sidecar {}", sidecar_dest.display());

    Ok(Some(sidecar_dest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sidecar_path_appends_suffix() {
        assert_eq!(
            sidecar_path(Path::new("/ws/classes/Foo.cls")),
            PathBuf::from("/ws/classes/Foo.cls-meta.xml")
        );
    }

    #[test]
    fn test_expects_sidecar() {
        assert!(expects_sidecar(Path::new("Foo.cls")));
        assert!(expects_sidecar(Path::new("T.trigger")));
        assert!(!expects_sidecar(Path::new("cmp.js")));
        assert!(!expects_sidecar(Path::new("README")));
    }

    #[test]
    fn test_resolve_never_invents_sidecar() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Foo.cls");
        fs::write(&file, "class").unwrap();

        // Extension suggests one, but nothing is on disk
        assert_eq!(resolve_sidecar(&file), None);

        fs::write(sidecar_path(&file), "<meta/>").unwrap();
        assert_eq!(resolve_sidecar(&file), Some(sidecar_path(&file)));
    }

    #[test]
    fn test_resolve_accepts_any_extension_when_present() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Widget.page");
        fs::write(&file, "<apex:page/>").unwrap();
        fs::write(sidecar_path(&file), "<meta/>").unwrap();

        assert!(resolve_sidecar(&file).is_some());
    }

    #[test]
    fn test_copy_with_sidecar_keeps_pairing() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("Foo.cls");
        fs::write(&src, "class").unwrap();
        fs::write(sidecar_path(&src), "<meta/>").unwrap();

        let dest = temp.path().join("out").join("Foo.cls");
        let copied = copy_with_sidecar(&src, &dest).unwrap();

        assert_eq!(copied, Some(sidecar_path(&dest)));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "class");
        assert_eq!(fs::read_to_string(sidecar_path(&dest)).unwrap(), "<meta/>");
    }

    #[test]
    fn test_copy_without_sidecar() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("Foo.cls");
        fs::write(&src, "class").unwrap();

        let dest = temp.path().join("Bar.cls");
        assert_eq!(copy_with_sidecar(&src, &dest).unwrap(), None);
        assert!(!sidecar_path(&dest).exists());
    }
}
