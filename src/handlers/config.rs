//! Config command handler

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::outcome::Outcome;
use crate::settings::{self, Settings};
use crate::VerbosityLevel;

/// Handle the config command against the settings file at `settings_path`
///
/// With no changes requested (or `--show`) the current settings are shown.
pub fn handle_config(
    settings_path: &Path,
    clone_suffix: Option<String>,
    include_triggers: Option<bool>,
    strict_ignore_update: Option<bool>,
    show: bool,
    verbosity: VerbosityLevel,
) -> Result<Option<Outcome>> {
    let mut current = Settings::load_from(settings_path)?;

    let nothing_to_change =
        clone_suffix.is_none() && include_triggers.is_none() && strict_ignore_update.is_none();
    if show || nothing_to_change {
        if verbosity != VerbosityLevel::Quiet {
            println!("{}", "Current Configuration:".bold());
            for (label, value) in settings::describe(&current) {
                println!("  {}: {}", label.cyan(), value);
            }
        }
        return Ok(Some(
            Outcome::info(format!("Settings loaded from {}", settings_path.display()))
                .with_path(settings_path),
        ));
    }

    let changes = settings::apply_update(
        &mut current,
        clone_suffix,
        include_triggers,
        strict_ignore_update,
    )?;
    current.save_to(settings_path)?;
    log::info!("Saved settings to {}", settings_path.display());

    if verbosity != VerbosityLevel::Quiet {
        for change in &changes {
            println!("{}", change.green());
        }
    }

    Ok(Some(
        Outcome::info(format!("Configuration saved ({} changes)", changes.len()))
            .with_path(settings_path),
    ))
}
