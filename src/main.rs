use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sfclone::handlers;
use sfclone::logger;
use sfclone::outcome::Outcome;
use sfclone::config::ConfigManager;
use sfclone::workspace::Workspace;
use sfclone::VerbosityLevel;

#[derive(Parser)]
#[command(name = "sfclone")]
#[command(about = "Clone, back up and restore Salesforce project components", long_about = None)]
#[command(version)]
struct Cli {
    /// Workspace (project) root
    #[arg(short, long, global = true, default_value = ".")]
    workspace: PathBuf,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Show per-category details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone the component a file belongs to
    Clone {
        /// File of the component to clone
        file: PathBuf,
    },

    /// Back up the current component or all components
    Backup {
        /// File of the component to back up
        #[arg(conflicts_with = "all")]
        file: Option<PathBuf>,

        /// Back up every component category
        #[arg(long)]
        all: bool,

        /// Label added to the backup folder name
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Restore a backup into force-app/main/default
    Restore {
        /// Backup folder name (prompted for when omitted)
        session: Option<String>,
    },

    /// List existing backups
    List,

    /// Delete all backups
    DeleteBackups {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Configure sfclone settings
    Config {
        /// Suffix used for clones (e.g. -clone or -Clone)
        #[arg(long)]
        clone_suffix: Option<String>,

        /// Include triggers when backing up all components
        #[arg(long)]
        include_triggers: Option<bool>,

        /// Fail the backup when .gitignore cannot be updated
        #[arg(long)]
        strict_ignore: Option<bool>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn run(cli: Cli, verbosity: VerbosityLevel) -> Result<Option<Outcome>> {
    match cli.command {
        Commands::Clone { file } => handlers::handle_clone(&file, verbosity),
        Commands::Backup { file, all, label } => {
            let workspace = Workspace::open(&cli.workspace)?;
            handlers::handle_backup(&workspace, file, all, label, verbosity)
        }
        Commands::Restore { session } => {
            let workspace = Workspace::open(&cli.workspace)?;
            handlers::handle_restore(&workspace, session, verbosity)
        }
        Commands::List => {
            let workspace = Workspace::open(&cli.workspace)?;
            handlers::handle_list(&workspace, verbosity)
        }
        Commands::DeleteBackups { yes } => {
            let workspace = Workspace::open(&cli.workspace)?;
            handlers::handle_delete_backups(&workspace, yes, verbosity)
        }
        Commands::Config {
            clone_suffix,
            include_triggers,
            strict_ignore,
            show,
        } => handlers::handle_config(
            &ConfigManager::settings_path()?,
            clone_suffix,
            include_triggers,
            strict_ignore,
            show,
            verbosity,
        ),
    }
}

fn main() -> Result<()> {
    logger::init_logger();

    let cli = Cli::parse();
    let json = cli.json;
    let verbosity = if json {
        VerbosityLevel::Quiet
    } else if cli.verbose {
        VerbosityLevel::Verbose
    } else {
        VerbosityLevel::Normal
    };

    let outcome = match run(cli, verbosity) {
        Ok(Some(outcome)) => outcome,
        Ok(None) => return Ok(()),
        Err(e) => {
            log::debug!("Operation failed: {e:?}");
            Outcome::from_error(&e)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        outcome.display();
    }

    if !outcome.success {
        std::process::exit(1);
    }

    Ok(())
}
