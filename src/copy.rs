//! Filesystem copy primitives shared by the engines.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copy a single file, creating the destination's parent folders.
///
/// An existing destination file is overwritten.
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::copy(src, dest)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
    log::debug!("Copied {} -> {}", src.display(), dest.display());

    Ok(())
}

/// Recursively copy `src` into `dest`, preserving the relative layout.
///
/// Files already present in `dest` are overwritten; files only present in
/// `dest` are left alone. The first failure aborts the copy and whatever was
/// copied so far stays in place. Returns the number of files copied.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;

    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create directory: {}", dest.display()))?;

    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to read {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Unexpected path {}", entry.path().display()))?;
        let target = dest.join(relative);
        // Empty folders are recreated too

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else if entry.file_type().is_symlink() && entry.path().is_dir() {
            // Following it could loop back into the tree being copied
            log::warn!("Skipping symlinked directory {}", entry.path().display());
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.txt");
        fs::write(&src, "hello").unwrap();

        let dest = temp.path().join("x").join("y").join("a.txt");
        copy_file(&src, &dest).unwrap();
        assert_eq!(fs::read_to_string(dest).unwrap(), "hello");
    }

    #[test]
    fn test_copy_dir_recursive_preserves_layout() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("nested").join("deeper")).unwrap();
        fs::write(src.join("top.txt"), "top").unwrap();
        fs::write(src.join("nested").join("deeper").join("leaf.txt"), "leaf").unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();

        let dest = temp.path().join("dest");
        let copied = copy_dir_recursive(&src, &dest).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dest.join("top.txt")).unwrap(), "top");
        assert_eq!(
            fs::read_to_string(dest.join("nested").join("deeper").join("leaf.txt")).unwrap(),
            "leaf"
        );
        assert!(dest.join("empty").is_dir());
    }

    #[test]
    fn test_copy_dir_recursive_merges_into_existing() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dest).unwrap();

        fs::write(src.join("shared.txt"), "new").unwrap();
        fs::write(dest.join("shared.txt"), "old").unwrap();
        fs::write(dest.join("stale.txt"), "keep me").unwrap();

        copy_dir_recursive(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("shared.txt")).unwrap(), "new");
        assert_eq!(fs::read_to_string(dest.join("stale.txt")).unwrap(), "keep me");
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let result = copy_file(&temp.path().join("nope"), &temp.path().join("out"));
        assert!(result.is_err());
    }
}
