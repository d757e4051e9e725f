//! Backup command handler

use anyhow::Result;
use colored::Colorize;
use inquire::{Select, Text};
use std::path::PathBuf;

use crate::backup::{self, BackupMode, BackupOptions};
use crate::error::Precondition;
use crate::interactive;
use crate::logger;
use crate::outcome::Outcome;
use crate::settings::Settings;
use crate::workspace::Workspace;
use crate::VerbosityLevel;

/// Ask which kind of backup to make, then which file if needed
fn prompt_mode() -> Result<Option<BackupMode>> {
    // The path in `Current` is filled in by the second prompt
    let choices = vec![BackupMode::Current(PathBuf::new()), BackupMode::All];
    let choice = Select::new("What would you like to back up?", choices).prompt();

    match interactive::answered(choice, "backup mode")? {
        Some(BackupMode::All) => Ok(Some(BackupMode::All)),
        Some(BackupMode::Current(_)) => {
            let file = Text::new("File to back up:")
                .with_placeholder("force-app/main/default/classes/MyClass.cls")
                .prompt();
            Ok(interactive::answered(file, "file path")?
                .map(|f| BackupMode::Current(PathBuf::from(f.trim()))))
        }
        None => Ok(None),
    }
}

fn prompt_label() -> Result<Option<Option<String>>> {
    let label = Text::new("Enter an optional label for the backup folder:")
        .with_placeholder("e.g. pre-deployment")
        .prompt();
    Ok(interactive::answered(label, "backup label")?
        .map(|l| Some(l).filter(|l| !l.is_empty())))
}

/// Handle the backup command
///
/// With neither a file nor `--all`, the mode and label are asked for
/// interactively, like the editor's quick pick and input box. Relative file
/// paths are taken from the current directory.
pub fn handle_backup(
    workspace: &Workspace,
    file: Option<PathBuf>,
    all: bool,
    label: Option<String>,
    verbosity: VerbosityLevel,
) -> Result<Option<Outcome>> {
    let (mode, label) = match (file, all) {
        (_, true) => (BackupMode::All, label),
        (Some(file), false) => (BackupMode::Current(file), label),
        (None, false) => {
            if !interactive::is_interactive() {
                return Err(
                    Precondition::NonInteractive("Specify a file to back up or pass --all").into(),
                );
            }
            // Same two questions the editor asks: what, then an optional label
            let Some(mode) = prompt_mode()? else {
                interactive::report_cancelled(verbosity);
                return Ok(None);
            };
            // A label given on the command line skips the prompt
            let label = match label {
                Some(label) => Some(label),
                None => match prompt_label()? {
                    Some(label) => label,
                    None => {
                        interactive::report_cancelled(verbosity);
                        return Ok(None);
                    }
                },
            };
            (mode, label)
        }
    };

    let settings = Settings::load()?;

    if verbosity != VerbosityLevel::Quiet {
        println!("{}", "Creating backup...".cyan());
    }

    let report = backup::create_backup(workspace, &BackupOptions { mode, label }, &settings)?;
    logger::audit(&format!(
        "backup {} files -> {}",
        report.files_copied,
        report.session_dir.display()
    ));

    if verbosity == VerbosityLevel::Verbose {
        for category in &report.categories {
            println!("  {} {}", "✓".green(), category);
        }
        println!("  {} {}", "Files:".cyan(), report.files_copied);
    }

    Ok(Some(report.to_outcome()))
}
