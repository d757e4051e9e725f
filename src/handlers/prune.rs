//! Delete-backups command handler

use anyhow::Result;
use colored::Colorize;
use inquire::Confirm;

use crate::error::Precondition;
use crate::interactive;
use crate::logger;
use crate::outcome::Outcome;
use crate::prune::{self, PruneReport, DELETE_WARNING};
use crate::workspace::Workspace;
use crate::VerbosityLevel;

/// Handle the delete-backups command
///
/// Without `--yes` the user must confirm in an interactive terminal.
pub fn handle_delete_backups(
    workspace: &Workspace,
    yes: bool,
    verbosity: VerbosityLevel,
) -> Result<Option<Outcome>> {
    // Nothing to confirm when there is nothing to delete
    if !workspace.backup_root().exists() {
        return Ok(Some(prune::delete_backups(workspace, false)?.to_outcome()));
    }

    let confirmed = if yes {
        true
    } else if interactive::is_interactive() {
        if verbosity != VerbosityLevel::Quiet {
            println!("{}", DELETE_WARNING.yellow().bold());
        }
        let answer = Confirm::new("Delete all backups?")
            .with_default(false)
            .with_help_message("This removes the whole \"SFClone Backup\" folder")
            .prompt();
        match interactive::answered(answer, "confirmation")? {
            Some(answer) => answer,
            None => {
                interactive::report_cancelled(verbosity);
                return Ok(None);
            }
        }
    } else {
        return Err(Precondition::NonInteractive("Pass --yes to delete all backups").into());
    };

    let report = prune::delete_backups(workspace, confirmed)?;
    if let PruneReport::Deleted { sessions, .. } = &report {
        logger::audit(&format!(
            "delete-backups {} ({sessions} sessions)",
            workspace.backup_root().display()
        ));
    }

    Ok(Some(report.to_outcome()))
}
