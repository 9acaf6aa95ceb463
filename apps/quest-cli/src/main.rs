//! # quest-cli
//!
//! Command-line interface for Eternal Quest.
//!
//! Every command loads the goal file, applies one change, and saves it back:
//! - `quest add simple|eternal|checklist` — create a goal
//! - `quest record <POSITION>` — record an event against a goal
//! - `quest list` — show goals and the total score
//! - `quest score` — print the total score

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quest_goal::{GoalFile, QuestConfig};
use tracing_subscriber::EnvFilter;

/// Eternal Quest — track goals and earn points.
#[derive(Parser)]
#[command(name = "quest", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Goal file to use instead of the configured one.
    #[arg(long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new goal.
    Add {
        #[command(subcommand)]
        command: commands::goal::AddCommands,
    },
    /// Record an event against the goal at POSITION (as shown by `list`).
    Record {
        /// 1-based position of the goal.
        position: usize,
    },
    /// List all goals with their progress.
    List {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the total score.
    Score,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("quest_goal=warn".parse()?)
                .add_directive("quest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let file = match cli.file {
        Some(path) => GoalFile::new(path),
        None => QuestConfig::load_or_default(&project_root)?.goal_file(&project_root),
    };
    tracing::debug!("Goal file: {}", file.path().display());

    match &cli.command {
        Commands::Add { command } => commands::goal::add(command, &file),
        Commands::Record { position } => commands::goal::record(&file, *position),
        Commands::List { json } => commands::goal::list(&file, *json),
        Commands::Score => commands::goal::score(&file),
    }
}
