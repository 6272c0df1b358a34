//! Show the flat sequence of a tree.

use std::path::Path;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format::{collect_rows, format_rows_table};
use crate::util::load_adapter;

/// Show command handler
pub fn cmd_show(
    config_path: Option<&Path>,
    tree: &Path,
    format: OutputFormat,
) -> Result<(), CliError> {
    let adapter = load_adapter(config_path, tree)?;
    let rows = collect_rows(&adapter);

    match format {
        OutputFormat::Table => println!("{}", format_rows_table(&rows)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| CliError::Output(format!("Failed to serialize rows: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}
