//! Settings and adapter state persistence across "restarts"

use std::fs;

use flexlist_core::{
    AdapterSettings, AdapterState, ConfigError, ConfigManager, ExpandableAdapter, ParentEntry,
    ScrollTieBreak,
};
use tempfile::TempDir;

fn tree() -> Vec<ParentEntry<String>> {
    vec![
        ParentEntry::new("Inbox".to_string())
            .with_children(["a".to_string(), "b".to_string()]),
        ParentEntry::new("Archive".to_string()),
        ParentEntry::new("Sent".to_string()).with_children(["c".to_string()]),
    ]
}

#[test]
fn test_settings_round_trip_drives_adapter() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(temp_dir.path().join("flexlist"));
    let settings = AdapterSettings::new()
        .with_auto_collapse(true)
        .with_scroll_tie_break(ScrollTieBreak::RevealChildren);
    manager.save_settings(&settings).unwrap();

    let loaded = manager.load_settings().unwrap();
    assert_eq!(loaded, settings);

    let mut adapter = ExpandableAdapter::with_settings(tree(), loaded);
    adapter.expand(0).unwrap();
    adapter.expand(4).unwrap();
    // auto-collapse left only "Sent" open
    assert_eq!(adapter.expanded_positions(), vec![2]);
}

#[test]
fn test_missing_settings_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(temp_dir.path().to_path_buf());
    assert_eq!(manager.load_settings().unwrap(), AdapterSettings::default());
}

#[test]
fn test_partial_and_invalid_settings_files() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(temp_dir.path().to_path_buf());

    fs::write(manager.settings_path(), "restore_selection = true\n").unwrap();
    let partial = manager.load_settings().unwrap();
    assert!(partial.restore_selection);
    assert!(!partial.auto_collapse_on_expand);

    fs::write(manager.settings_path(), "scroll_delay_ms = \"soon\"\n").unwrap();
    assert!(matches!(
        manager.load_settings(),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");

    let mut adapter = ExpandableAdapter::new(tree());
    adapter.expand(0).unwrap();
    adapter.expand(4).unwrap();
    adapter.toggle(5).unwrap();
    let state = adapter.export_state();
    fs::write(&path, state.to_json().unwrap()).unwrap();

    let json = fs::read_to_string(&path).unwrap();
    let restored = AdapterState::from_json(&json).unwrap();
    let mut fresh = ExpandableAdapter::new(tree());
    fresh.import_state(&restored).unwrap();

    assert_eq!(fresh.expanded_positions(), vec![0, 4]);
    assert_eq!(fresh.selected_positions(), vec![5]);
    assert_eq!(fresh.payload(5).unwrap(), "c");
}
