//! `FlexList` CLI - Command-line interface for the `FlexList` adapter
//!
//! Loads a tree fixture, shows its flat sequence, and replays scripted
//! adapter operations while printing every change notification.

mod cli;
mod commands;
mod error;
mod format;
mod script;
mod util;

use clap::Parser;
use cli::Cli;
use flexlist_core::tracing::{TracingConfig, TracingLevel, init_tracing};

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    if !cli.quiet {
        let config = TracingConfig::new().with_level(TracingLevel::from_verbosity(cli.verbose));
        if let Err(e) = init_tracing(&config) {
            eprintln!("Warning: {e}");
        }
    }

    let result = commands::dispatch(config_path, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
