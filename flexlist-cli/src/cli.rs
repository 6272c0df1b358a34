//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// `FlexList` command-line interface for inspecting expandable lists
#[derive(Parser)]
#[command(name = "flexlist-cli")]
#[command(author, version, about = "FlexList command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "FLEXLIST_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the flat sequence of a tree
    #[command(about = "Load a JSON tree and print its flat sequence")]
    Show {
        /// JSON file holding a list of parent entries
        #[arg(short, long)]
        tree: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Replay a script of adapter operations
    #[command(about = "Apply a JSON operation script to a tree")]
    Replay {
        /// JSON file holding a list of parent entries
        #[arg(short, long)]
        tree: PathBuf,

        /// JSON file holding a list of operations
        #[arg(short, long)]
        script: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}
