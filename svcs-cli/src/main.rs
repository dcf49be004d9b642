use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use svcs_core::{RepoConfig, Repository};
use tracing::Level;

mod commands;

use commands::{add, checkout, commit, config, log, status};

const HELP: &str = "These are SVCS commands:
config     Get and set a username.
add        Add a file to the index.
log        Show commit logs.
commit     Save changes.
checkout   Restore a file.
status     Compare tracked files with the latest commit.";

#[derive(Parser)]
#[command(name = "svcs")]
#[command(version, about = "A minimal local version control system", long_about = None)]
#[command(
    disable_help_flag = true,
    disable_help_subcommand = true,
    allow_external_subcommands = true
)]
struct Cli {
    /// Working directory that holds the store (defaults to current directory)
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Diagnostic output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Print the list of commands
    #[arg(long, action = ArgAction::SetTrue)]
    help: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Get and set a username
    Config {
        /// New committer name (words are joined with spaces)
        name: Vec<String>,
    },

    /// Add a file to the index, or list tracked files
    Add {
        /// File to track, relative to the working directory
        path: Option<String>,
    },

    /// Show commit logs
    Log {
        /// Number of commits to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save changes
    Commit {
        /// Commit message
        #[arg(allow_hyphen_values = true)]
        message: Option<String>,
    },

    /// Restore files from a commit
    Checkout {
        /// Commit hash to restore
        commit_id: Option<String>,
    },

    /// Compare tracked files with the latest commit
    Status,

    #[command(external_subcommand)]
    External(Vec<String>),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let repo = Repository::open(RepoConfig::new(&cli.root))
        .with_context(|| format!("Failed to open store in {}", cli.root.display()))?;

    let command = match cli.command {
        Some(command) if !cli.help => command,
        _ => {
            println!("{}", HELP);
            return Ok(());
        }
    };

    match command {
        Commands::Config { name } => {
            config::run(&repo, name)?;
        }
        Commands::Add { path } => {
            add::run(&repo, path)?;
        }
        Commands::Log { limit, json } => {
            log::run(&repo, limit, json)?;
        }
        Commands::Commit { message } => {
            commit::run(&repo, message)?;
        }
        Commands::Checkout { commit_id } => {
            checkout::run(&repo, commit_id)?;
        }
        Commands::Status => {
            status::run(&repo)?;
        }
        Commands::External(args) => {
            let name = args.first().map(String::as_str).unwrap_or_default();
            println!("'{}' is not a SVCS command.", name);
        }
    }

    Ok(())
}
