//! Configuration management for `FlexList`
//!
//! This module provides the `ConfigManager` for loading and saving the
//! adapter policy settings in TOML format.

mod manager;
pub mod settings;

pub use manager::{ConfigManager, SETTINGS_FILE};
pub use settings::{AdapterSettings, DEFAULT_SCROLL_DELAY_MS, ScrollTieBreak};
