use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::component::Category;

/// Suffix appended to cloned files and bundle folders
pub const DEFAULT_CLONE_SUFFIX: &str = "-clone";

/// User settings persisted in `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Suffix inserted by the clone engine (`-clone` or `-Clone`)
    #[serde(default = "default_clone_suffix")]
    pub clone_suffix: String,

    /// Include `triggers` when backing up all components
    #[serde(default = "default_true")]
    pub include_triggers: bool,

    /// Fail the whole backup when the `.gitignore` update fails
    #[serde(default)]
    pub strict_ignore_update: bool,
}

fn default_clone_suffix() -> String {
    DEFAULT_CLONE_SUFFIX.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            clone_suffix: default_clone_suffix(),
            include_triggers: true,
            strict_ignore_update: false,
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&crate::config::ConfigManager::settings_path()?)
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&crate::config::ConfigManager::settings_path()?)
    }

    /// Save settings to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Categories copied by an "all components" backup, in copy order
    pub fn backup_categories(&self) -> Vec<Category> {
        Category::BACKUP_ORDER
            .iter()
            .copied()
            .filter(|c| self.include_triggers || *c != Category::Triggers)
            .collect()
    }
}

/// Validate and apply requested changes, returning one line per change
pub fn apply_update(
    settings: &mut Settings,
    clone_suffix: Option<String>,
    include_triggers: Option<bool>,
    strict_ignore_update: Option<bool>,
) -> Result<Vec<String>> {
    let mut changes = Vec::new();

    if let Some(suffix) = clone_suffix {
        let suffix = suffix.trim().to_string();
        // The suffix ends up inside file names
        if suffix.is_empty() || suffix.contains(['/', '\\', '.']) {
            anyhow::bail!("Invalid clone suffix '{suffix}': must be non-empty and contain no '/', '\\' or '.'");
        }
        changes.push(format!("Set clone_suffix to {suffix}"));
        settings.clone_suffix = suffix;
    }

    if let Some(include) = include_triggers {
        settings.include_triggers = include;
        changes.push(format!("Include triggers: {include}"));
    }

    if let Some(strict) = strict_ignore_update {
        settings.strict_ignore_update = strict;
        changes.push(format!("Strict .gitignore update: {strict}"));
    }

    Ok(changes)
}

/// Label and value of every setting, in display order
pub fn describe(settings: &Settings) -> Vec<(&'static str, String)> {
    let categories = settings
        .backup_categories()
        .iter()
        .map(|c| c.dir_name())
        .collect::<Vec<_>>()
        .join(", ");
    let ignore_policy = if settings.strict_ignore_update {
        "Strict (failure aborts backup)"
    } else {
        "Best effort (failure is a warning)"
    };

    vec![
        ("Clone suffix", settings.clone_suffix.clone()),
        ("Backup categories", categories),
        (".gitignore update", ignore_policy.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.clone_suffix, "-clone");
        assert!(settings.include_triggers);
        assert!(!settings.strict_ignore_update);
    }

    #[test]
    fn test_backup_categories_respects_triggers_flag() {
        let with = Settings::default();
        assert_eq!(
            with.backup_categories(),
            vec![Category::Classes, Category::Triggers, Category::Lwc, Category::Aura]
        );

        let without = Settings {
            include_triggers: false,
            ..Default::default()
        };
        assert_eq!(
            without.backup_categories(),
            vec![Category::Classes, Category::Lwc, Category::Aura]
        );
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "clone_suffix = \"-Clone\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.clone_suffix, "-Clone");
        assert!(settings.include_triggers);
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let settings = Settings {
            clone_suffix: "-Clone".to_string(),
            include_triggers: false,
            strict_ignore_update: true,
        };

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_apply_update_reports_each_change() {
        let mut settings = Settings::default();
        let changes =
            apply_update(&mut settings, Some(" -Clone ".to_string()), Some(false), None).unwrap();

        assert_eq!(settings.clone_suffix, "-Clone");
        assert!(!settings.include_triggers);
        assert!(!settings.strict_ignore_update);
        assert_eq!(changes, vec!["Set clone_suffix to -Clone", "Include triggers: false"]);
    }

    #[test]
    fn test_apply_update_rejects_bad_suffix() {
        let mut settings = Settings::default();
        for bad in ["", "  ", "a/b", "x.y"] {
            assert!(apply_update(&mut settings, Some(bad.to_string()), None, None).is_err());
        }
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_describe_follows_triggers_and_policy() {
        let settings = Settings {
            include_triggers: false,
            strict_ignore_update: true,
            ..Default::default()
        };
        let lines = describe(&settings);
        assert_eq!(lines[0], ("Clone suffix", "-clone".to_string()));
        assert_eq!(lines[1], ("Backup categories", "classes, lwc, aura".to_string()));
        assert!(lines[2].1.starts_with("Strict"));
    }
}
