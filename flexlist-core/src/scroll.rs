//! Deferred auto-scroll after expansion
//!
//! When the auto-scroll policy is active, each successful expansion queues an
//! [`AutoScrollRequest`]. The host waits for [`AutoScrollRequest::delay`]
//! (so the view can settle after an automatic collapse) and then asks the
//! adapter to resolve it against the current [`Viewport`]. A request made
//! stale by later mutations resolves to nothing.

use std::time::Duration;

use crate::config::ScrollTieBreak;
use crate::models::NodeId;

/// Viewport query capability provided by the view layer.
pub trait Viewport {
    /// Position of the first completely visible row
    fn first_visible(&self) -> usize;
    /// Position of the last completely visible row
    fn last_visible(&self) -> usize;
}

/// A viewport described by two fixed positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport {
    /// First completely visible row
    pub first: usize,
    /// Last completely visible row
    pub last: usize,
}

impl FixedViewport {
    /// Creates a viewport showing rows `first ..= last`
    #[must_use]
    pub const fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }
}

impl Viewport for FixedViewport {
    fn first_visible(&self) -> usize {
        self.first
    }

    fn last_visible(&self) -> usize {
        self.last
    }
}

/// Fire-and-forget scroll request queued by an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoScrollRequest {
    /// The parent that was expanded
    pub parent: NodeId,
    /// Its position right after expansion
    pub position: usize,
    /// Number of children spliced in
    pub child_count: usize,
    /// How long the host should wait before resolving the request
    pub delay: Duration,
    /// Adapter generation at the time of expansion
    pub generation: u64,
}

/// Computes the row to scroll to so an expanded parent shows as many of its
/// children as possible.
///
/// Returns `None` when no scrolling is needed.
#[must_use]
pub fn scroll_target(
    position: usize,
    child_count: usize,
    viewport: &dyn Viewport,
    tie_break: ScrollTieBreak,
) -> Option<usize> {
    let first = viewport.first_visible() as isize;
    let last = viewport.last_visible() as isize;
    let position = position as isize;
    let child_count = child_count as isize;

    let items_to_show = position + child_count - last;
    if items_to_show > 0 {
        // Moving further than `to_parent` would push the parent off the top.
        let to_parent = position - first;
        let to_last_child = items_to_show.max(0);
        let scroll_by = match tie_break {
            ScrollTieBreak::Nearest => to_parent.min(to_last_child),
            ScrollTieBreak::RevealChildren => to_parent.max(to_last_child),
        };
        Some((first + scroll_by).max(0) as usize)
    } else if position < first {
        Some(position as usize)
    } else {
        None
    }
}
