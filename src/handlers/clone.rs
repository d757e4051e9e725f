//! Clone command handler

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::clone;
use crate::logger;
use crate::outcome::Outcome;
use crate::settings::Settings;
use crate::VerbosityLevel;

/// Handle the clone command for the given active file
pub fn handle_clone(active_file: &Path, verbosity: VerbosityLevel) -> Result<Option<Outcome>> {
    // Suffix comes from config.toml, defaults to -clone
    let settings = Settings::load()?;

    if verbosity != VerbosityLevel::Quiet {
        println!("{}", "Cloning component...".cyan());
    }

    let report = clone::clone_component(active_file, &settings.clone_suffix)?;
    logger::audit(&format!(
        "clone {} -> {}",
        active_file.display(),
        report.destination().display()
    ));

    // Bundle clones already report a file count in the outcome
    if verbosity == VerbosityLevel::Verbose {
        if let clone::CloneReport::File {
            sidecar: Some(sidecar),
            ..
        } = &report
        {
            println!("  {} {}", "Metadata:".cyan(), sidecar.display());
        }
    }

    Ok(Some(report.to_outcome()))
}
