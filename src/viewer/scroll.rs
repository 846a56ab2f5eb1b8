//! Scroll coalescing for `TableView`.
//!
//! Scroll events can arrive far faster than frames are drawn. Intermediate
//! positions are never rendered, so a burst collapses to its latest value.

use tracing::trace;

use super::TableView;
use crate::types::Window;

/// Holds the latest not-yet-applied scroll position.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollCoalescer {
    pending: Option<f64>,
    dropped: usize,
}

impl ScrollCoalescer {
    /// Record a scroll position, superseding any pending one.
    pub fn push(&mut self, scroll_top: f64) {
        if self.pending.replace(scroll_top).is_some() {
            self.dropped += 1;
        }
    }

    /// Take the latest position, leaving nothing pending.
    pub fn take(&mut self) -> Option<f64> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Positions superseded before they were applied.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl TableView {
    /// Record a scroll event without recomputing.
    pub fn queue_scroll(&mut self, scroll_top: f64) {
        self.pending_scroll.push(scroll_top);
    }

    /// Apply the latest queued scroll position, if any.
    ///
    /// Returns the new window when something was pending.
    pub fn flush_scroll(&mut self) -> Option<Window> {
        let scroll_top = self.pending_scroll.take()?;
        trace!(
            scroll_top,
            dropped = self.pending_scroll.dropped(),
            "flushing coalesced scroll"
        );
        self.viewport.scroll_top = scroll_top;
        self.recompute();
        Some(self.window)
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending_scroll.is_pending()
    }

    pub fn dropped_scrolls(&self) -> usize {
        self.pending_scroll.dropped()
    }
}
