//! Command handler modules for the CLI.

mod completions;
mod replay;
mod show;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Show { tree, format } => show::cmd_show(config_path, &tree, format),
        Commands::Replay {
            tree,
            script,
            format,
        } => replay::cmd_replay(config_path, &tree, &script, format),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
