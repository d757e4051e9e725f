//! Restore command handler

use anyhow::Result;
use colored::Colorize;
use inquire::Select;

use crate::error::Precondition;
use crate::interactive;
use crate::logger;
use crate::outcome::Outcome;
use crate::restore;
use crate::workspace::Workspace;
use crate::VerbosityLevel;

/// Handle the restore command
///
/// Without a session name, the user picks one from the existing backups.
pub fn handle_restore(
    workspace: &Workspace,
    session: Option<String>,
    verbosity: VerbosityLevel,
) -> Result<Option<Outcome>> {
    let session = match session {
        Some(session) => session,
        None => {
            // No prompt when there is nothing to choose from
            let sessions = restore::list_sessions(workspace)?;
            if sessions.is_empty() {
                return Err(Precondition::NoBackups(workspace.backup_root()).into());
            }
            if !interactive::is_interactive() {
                return Err(Precondition::NonInteractive("Name the backup to restore").into());
            }

            let choice = Select::new("Select a backup to restore", sessions).prompt();
            match interactive::answered(choice, "backup selection")? {
                Some(info) => info.name,
                None => {
                    interactive::report_cancelled(verbosity);
                    return Ok(None);
                }
            }
        }
    };

    if verbosity != VerbosityLevel::Quiet {
        println!("{}", format!("Restoring backup \"{session}\"...").cyan());
    }

    let report = restore::restore_session(workspace, &session)?;
    logger::audit(&format!(
        "restore {} ({} files)",
        report.session, report.files_restored
    ));

    if verbosity == VerbosityLevel::Verbose {
        for category in &report.categories {
            println!("  {} {}", "✓".green(), category);
        }
    }

    Ok(Some(report.to_outcome(workspace)))
}
