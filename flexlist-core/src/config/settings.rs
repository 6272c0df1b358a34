//! Adapter policy settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default delay before an auto-scroll request should fire
pub const DEFAULT_SCROLL_DELAY_MS: u64 = 150;

/// How the auto-scroll target is chosen when the expanded children do not
/// fit below the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollTieBreak {
    /// Scroll the smaller of "bring the parent to the top" and "reveal the
    /// last child"
    #[default]
    Nearest,
    /// Scroll the larger of the two, revealing as many children as possible
    RevealChildren,
}

/// Behaviour switches of [`crate::ExpandableAdapter`].
///
/// Stored as `settings.toml` by [`super::ConfigManager`]. Every field has a
/// default, so partial files are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterSettings {
    /// Collapse every other parent before expanding one
    pub auto_collapse_on_expand: bool,
    /// Queue an auto-scroll request after each expansion
    pub auto_scroll_on_expand: bool,
    /// Delay in milliseconds the host should wait before resolving a scroll
    pub scroll_delay_ms: u64,
    /// Target selection policy for auto-scroll
    pub scroll_tie_break: ScrollTieBreak,
    /// Re-select restored rows after an undo
    pub restore_selection: bool,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            auto_collapse_on_expand: false,
            auto_scroll_on_expand: false,
            scroll_delay_ms: DEFAULT_SCROLL_DELAY_MS,
            scroll_tie_break: ScrollTieBreak::Nearest,
            restore_selection: false,
        }
    }
}

impl AdapterSettings {
    /// Creates settings with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the auto-collapse policy
    #[must_use]
    pub const fn with_auto_collapse(mut self, enabled: bool) -> Self {
        self.auto_collapse_on_expand = enabled;
        self
    }

    /// Sets the auto-scroll policy
    #[must_use]
    pub const fn with_auto_scroll(mut self, enabled: bool) -> Self {
        self.auto_scroll_on_expand = enabled;
        self
    }

    /// Sets the auto-scroll tie-break
    #[must_use]
    pub const fn with_scroll_tie_break(mut self, tie_break: ScrollTieBreak) -> Self {
        self.scroll_tie_break = tie_break;
        self
    }

    /// Sets the restore-selection policy
    #[must_use]
    pub const fn with_restore_selection(mut self, enabled: bool) -> Self {
        self.restore_selection = enabled;
        self
    }

    /// Returns the scroll delay as a `Duration`
    #[must_use]
    pub const fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}
