//! List command handler

use anyhow::Result;
use colored::Colorize;

use crate::outcome::Outcome;
use crate::restore;
use crate::workspace::Workspace;
use crate::VerbosityLevel;

/// Handle the list command
pub fn handle_list(workspace: &Workspace, verbosity: VerbosityLevel) -> Result<Option<Outcome>> {
    let sessions = restore::list_sessions(workspace)?;

    if sessions.is_empty() {
        return Ok(Some(Outcome::info("No backups found.")));
    }

    if verbosity != VerbosityLevel::Quiet {
        println!("{}", "Backups (newest first):".bold());
        for session in &sessions {
            let when = session
                .modified
                .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let categories = session
                .categories
                .iter()
                .map(|c| c.dir_name())
                .collect::<Vec<_>>()
                .join(", ");

            println!(
                "  {}  {}  {}",
                session.name.cyan(),
                when.dimmed(),
                if categories.is_empty() {
                    "(empty)".yellow()
                } else {
                    categories.normal()
                }
            );
        }
        println!();
    }

    Ok(Some(
        Outcome::info(format!("{} backups found.", sessions.len()))
            .with_path(workspace.backup_root()),
    ))
}
