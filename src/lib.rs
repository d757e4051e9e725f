//! # sfclone
//!
//! A command-line tool for cloning, backing up and restoring the components of
//! a Salesforce DX project (`force-app/main/default`).
//!
//! ## Overview
//!
//! `sfclone` works on four component categories: Apex `classes`, `triggers`,
//! Lightning Web Components (`lwc`) and Aura components (`aura`). Classes and
//! triggers are single files that travel with a `-meta.xml` sidecar; LWC and
//! Aura components are bundle folders.
//!
//! - **Clone**: duplicate a file (and its sidecar) or a whole bundle next to
//!   the original with a `-clone` suffix
//! - **Backup**: copy the current component or every category into a
//!   timestamped, optionally labeled folder under `SFClone Backup/`, and keep
//!   that folder out of git
//! - **Restore**: merge a backup session back into the project tree
//! - **Delete backups**: remove the whole `SFClone Backup/` folder
//!
//! ## Architecture
//!
//! - Classification and layout ([`component`], [`sidecar`], [`workspace`])
//! - Engines ([`clone`], [`backup`], [`restore`], [`prune`]) on top of the
//!   copy primitives in [`copy`]
//! - Results and failures ([`outcome`], [`error`])
//! - Settings, logging and the terminal front end ([`config`], [`settings`],
//!   [`logger`], [`interactive`], [`handlers`])

/// Backup engine: timestamped sessions and the `.gitignore` entry.
pub mod backup;

/// Clone engine for single files and component bundles.
pub mod clone;

/// Component categories and path classification.
pub mod component;

/// Platform-specific configuration directory management.
pub mod config;

/// Recursive copy helpers built on `walkdir`.
pub mod copy;

/// Precondition failures raised before any filesystem I/O.
pub mod error;

/// Command handlers driving the engines from the command line.
pub mod handlers;

/// Interactive prompt helpers.
pub mod interactive;

/// Logging configuration and the operation log file.
pub mod logger;

/// The status object every operation reports.
pub mod outcome;

/// Deletion of the backup root.
pub mod prune;

/// Listing and restoring backup sessions.
pub mod restore;

/// Persisted user settings (`config.toml`).
pub mod settings;

/// `-meta.xml` sidecar resolution and copying.
pub mod sidecar;

/// Fixed workspace layout.
pub mod workspace;

/// How much progress output the command line prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Only the final outcome
    Quiet,
    /// Progress lines and the final outcome
    Normal,
    /// Per-category and per-file details
    Verbose,
}
