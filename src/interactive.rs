//! Terminal prompts standing in for the editor's menus and input boxes.

use anyhow::{Context, Result};
use colored::Colorize;
use inquire::InquireError;

use crate::VerbosityLevel;

/// Check if we're running in an interactive terminal
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}

/// Turn a prompt answer into `Some`, or `None` when the user backed out.
///
/// Esc and Ctrl-C are user cancellation, not failures.
pub fn answered<T>(result: Result<T, InquireError>, what: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to get {what}")),
    }
}

/// Tell the user nothing happened
pub fn report_cancelled(verbosity: VerbosityLevel) {
    if verbosity != VerbosityLevel::Quiet {
        println!("{}", "Cancelled, nothing was changed.".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_and_interrupt_are_not_errors() {
        let cancelled: Result<u8, InquireError> = Err(InquireError::OperationCanceled);
        assert_eq!(answered(cancelled, "choice").unwrap(), None);

        let interrupted: Result<u8, InquireError> = Err(InquireError::OperationInterrupted);
        assert_eq!(answered(interrupted, "choice").unwrap(), None);
    }

    #[test]
    fn test_answer_passes_through() {
        assert_eq!(answered(Ok::<_, InquireError>(7), "choice").unwrap(), Some(7));
    }

    #[test]
    fn test_other_prompt_errors_propagate() {
        let failed: Result<u8, InquireError> = Err(InquireError::NotTTY);
        let err = answered(failed, "backup label").unwrap_err();
        assert!(err.to_string().contains("backup label"));
    }
}
