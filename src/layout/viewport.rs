//! Viewport state management for vertical scrolling.

use crate::config::TableConfig;
use crate::types::Window;

use super::window::compute_window;

/// Viewport state - the scroll position plus the fixed table geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Vertical scroll position in pixels
    pub scroll_top: f64,
    /// Scroll container height in pixels
    pub viewport_height: f64,
    /// Height of every row in pixels
    pub row_height: f64,
    /// Rows rendered beyond each edge
    pub overscan: usize,
    /// Sticky header height in pixels
    pub header_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a new viewport with default geometry
    pub fn new() -> Self {
        Self::from_config(&TableConfig::default())
    }

    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            scroll_top: 0.0,
            viewport_height: config.viewport_height,
            row_height: config.row_height,
            overscan: config.overscan,
            header_height: config.header_height,
        }
    }

    /// Window of rows to render for the current scroll position.
    pub fn window(&self, total_rows: usize) -> Window {
        compute_window(
            self.scroll_top,
            self.viewport_height,
            self.row_height,
            self.overscan,
            total_rows,
        )
    }

    /// Height of the rows alone.
    pub fn rows_height(&self, total_rows: usize) -> f64 {
        total_rows as f64 * self.row_height
    }

    /// Height of the scrollable content: header plus every row.
    pub fn content_height(&self, total_rows: usize) -> f64 {
        self.rows_height(total_rows) + self.header_height
    }

    /// Largest scroll position that still shows content.
    pub fn max_scroll(&self, total_rows: usize) -> f64 {
        (self.content_height(total_rows) - self.viewport_height).max(0.0)
    }

    /// Clamp scroll position to valid range.
    ///
    /// Mirrors what a scroll container does when its content shrinks, e.g.
    /// after a filter removes rows.
    pub fn clamp_scroll(&mut self, total_rows: usize) {
        let max = self.max_scroll(total_rows);
        self.scroll_top = if self.scroll_top.is_nan() {
            0.0
        } else {
            self.scroll_top.clamp(0.0, max)
        };
    }

    /// Scroll by a delta
    pub fn scroll_by(&mut self, delta_y: f64, total_rows: usize) {
        self.scroll_top += delta_y;
        self.clamp_scroll(total_rows);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, y: f64, total_rows: usize) {
        self.scroll_top = y;
        self.clamp_scroll(total_rows);
    }

    /// Scroll so that row `index` is at the top of the viewport.
    pub fn scroll_to_row(&mut self, index: usize, total_rows: usize) {
        self.set_scroll(index as f64 * self.row_height, total_rows);
    }

    /// Processed index of the row at content y-coordinate `y`, if any.
    // Cast is guarded: y is finite and non-negative, `as` saturates.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn row_at(&self, y: f64, total_rows: usize) -> Option<usize> {
        if !(y.is_finite() && y >= 0.0 && self.row_height > 0.0) {
            return None;
        }
        let index = (y / self.row_height).floor() as usize;
        (index < total_rows).then_some(index)
    }

    /// Resize the viewport
    pub fn resize(&mut self, viewport_height: f64, total_rows: usize) {
        self.viewport_height = viewport_height;
        self.clamp_scroll(total_rows);
    }
}
