//! Shared utility functions used across command modules.

use std::fs;
use std::path::Path;

use flexlist_core::{AdapterSettings, ConfigManager, ExpandableAdapter, ParentEntry};
use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads adapter settings, defaulting when no settings file exists
pub fn load_settings(config_path: Option<&Path>) -> Result<AdapterSettings, CliError> {
    create_config_manager(config_path)?
        .load_settings()
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))
}

/// Reads and decodes a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = fs::read_to_string(path).map_err(|e| CliError::Input {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| CliError::Input {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Builds an adapter over the tree stored at `tree_path`
pub fn load_adapter(
    config_path: Option<&Path>,
    tree_path: &Path,
) -> Result<ExpandableAdapter<String>, CliError> {
    let settings = load_settings(config_path)?;
    let items: Vec<ParentEntry<String>> = read_json(tree_path)?;
    tracing::debug!(parents = items.len(), path = %tree_path.display(), "Loaded tree");
    Ok(ExpandableAdapter::with_settings(items, settings))
}
