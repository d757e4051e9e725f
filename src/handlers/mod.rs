//! Command handler modules
//!
//! Each handler gathers the inputs an engine needs (from arguments or
//! interactive prompts), runs it and turns the result into an [`Outcome`].
//! `Ok(None)` means the user cancelled a prompt before any I/O happened.
//!
//! [`Outcome`]: crate::outcome::Outcome

pub mod backup;
pub mod clone;
pub mod config;
pub mod list;
pub mod prune;
pub mod restore;

pub use backup::handle_backup;
pub use clone::handle_clone;
pub use config::handle_config;
pub use list::handle_list;
pub use prune::handle_delete_backups;
pub use restore::handle_restore;
