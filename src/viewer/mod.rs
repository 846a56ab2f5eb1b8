//! `TableView` - the event-driven controller tying the stages together.
//!
//! This module owns the per-session state and keeps it consistent:
//! - The immutable dataset and the memoized query (filter + sort)
//! - Viewport scroll state and the derived window
//! - The selection ledger and column configuration
//!
//! Every mutator finishes its recompute before returning, so a `Frame` taken
//! afterwards never pairs a stale window with a new processed sequence. The
//! wasm-exported wrapper lives in `bindings.rs`.

mod bindings;
mod events;
mod scroll;

pub use bindings::RowView;
pub use events::TableEvent;
pub use scroll::ScrollCoalescer;

use serde::Serialize;
use tracing::trace;

use crate::columns::ColumnSet;
use crate::config::TableConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::layout::Viewport;
use crate::query::{ColumnFilters, QueryState};
use crate::selection::SelectionLedger;
use crate::types::{Column, HeaderCheck, Row, RowId, SortKey, Window};

#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_ms() -> f64 {
    use std::time::Instant;
    thread_local! {
        static START: Instant = Instant::now();
    }
    START.with(|s| s.elapsed().as_secs_f64() * 1000.0)
}

/// Timing for one recompute pass.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeMetrics {
    /// Whether the processed sequence had to be rebuilt
    pub recomputed_query: bool,
    pub query_ms: f64,
    pub window_ms: f64,
    pub processed_rows: usize,
    pub rendered_rows: usize,
}

/// One windowed row as handed to the presentation layer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRow<'a> {
    /// Index in the processed sequence
    pub index: usize,
    pub id: RowId,
    /// Top edge within the scroll spacer, in pixels
    pub top: f64,
    pub selected: bool,
    pub row: &'a Row,
}

/// Everything the presentation layer needs to draw the table body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame<'a> {
    pub window: Window,
    pub scroll_top: f64,
    /// Rows in the processed sequence
    pub total_rows: usize,
    /// Rows in the dataset before filtering
    pub dataset_rows: usize,
    pub selected_count: usize,
    pub header_check: HeaderCheck,
    pub filter_text: &'a str,
    pub column_filters: &'a ColumnFilters,
    pub sort: Option<&'a SortKey>,
    /// Visible columns, frozen first
    pub columns: Vec<&'a Column>,
    pub rows: Vec<FrameRow<'a>>,
}

/// Controller for one virtualized table.
#[derive(Debug, Clone)]
pub struct TableView {
    dataset: Dataset,
    query: QueryState,
    viewport: Viewport,
    selection: SelectionLedger,
    columns: ColumnSet,
    window: Window,
    pending_scroll: ScrollCoalescer,
}

impl TableView {
    /// Create a view over `dataset`, with one column per field.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration is out of range.
    pub fn new(dataset: Dataset, config: &TableConfig) -> Result<Self> {
        config.validate()?;
        let columns = ColumnSet::from_fields(&dataset.field_names());
        let query = QueryState::new(&dataset);
        let viewport = Viewport::from_config(config);
        let window = viewport.window(query.len());
        Ok(Self {
            dataset,
            query,
            viewport,
            selection: SelectionLedger::new(),
            columns,
            window,
            pending_scroll: ScrollCoalescer::default(),
        })
    }

    #[must_use]
    pub fn with_columns(mut self, columns: ColumnSet) -> Self {
        self.columns = columns;
        self
    }

    /// Replace the dataset. Scroll, selection and query cache are reset;
    /// filter text and sort key are kept.
    pub fn load(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.selection.clear();
        self.pending_scroll = ScrollCoalescer::default();
        self.viewport.scroll_top = 0.0;
        self.query.invalidate();
        self.recompute();
    }

    /// Refresh the query if needed, clamp scroll, recompute the window.
    fn recompute(&mut self) {
        self.query.refresh(&self.dataset);
        let total = self.query.len();
        self.viewport.clamp_scroll(total);
        self.window = self.viewport.window(total);
    }

    /// Same as the implicit recompute, with timings.
    pub fn refresh_with_metrics(&mut self) -> RecomputeMetrics {
        self.flush_scroll();
        let t0 = now_ms();
        let recomputed_query = self.query.refresh(&self.dataset);
        let t1 = now_ms();
        let total = self.query.len();
        self.viewport.clamp_scroll(total);
        self.window = self.viewport.window(total);
        let t2 = now_ms();
        RecomputeMetrics {
            recomputed_query,
            query_ms: t1 - t0,
            window_ms: t2 - t1,
            processed_rows: total,
            rendered_rows: self.window.len(),
        }
    }

    // ---------------------------------------------------------------------
    // Scrolling
    // ---------------------------------------------------------------------

    /// Apply a scroll event immediately.
    pub fn on_scroll(&mut self, scroll_top: f64) -> Window {
        self.pending_scroll = ScrollCoalescer::default();
        self.viewport.scroll_top = scroll_top;
        self.recompute();
        self.window
    }

    pub fn scroll_by(&mut self, delta_y: f64) -> Window {
        self.flush_scroll();
        self.viewport.scroll_by(delta_y, self.query.len());
        self.recompute();
        self.window
    }

    /// Scroll so that processed row `index` is at the top.
    pub fn scroll_to_row(&mut self, index: usize) -> Window {
        self.flush_scroll();
        self.viewport.scroll_to_row(index, self.query.len());
        self.recompute();
        self.window
    }

    pub fn resize(&mut self, viewport_height: f64) -> Window {
        self.flush_scroll();
        self.viewport.resize(viewport_height, self.query.len());
        self.recompute();
        self.window
    }

    // ---------------------------------------------------------------------
    // Query
    // ---------------------------------------------------------------------

    pub fn set_filter(&mut self, text: &str) -> Window {
        self.flush_scroll();
        self.query.set_filter(text);
        self.recompute();
        self.window
    }

    /// Filter one column by substring; empty text removes the filter.
    pub fn set_column_filter(&mut self, column: &str, text: &str) -> Window {
        self.flush_scroll();
        self.query.set_column_filter(column, text);
        self.recompute();
        self.window
    }

    pub fn clear_column_filter(&mut self, column: &str) -> Window {
        self.set_column_filter(column, "")
    }

    pub fn clear_column_filters(&mut self) -> Window {
        self.flush_scroll();
        self.query.clear_column_filters();
        self.recompute();
        self.window
    }

    /// Header click: ascending on a new field, flip direction on the same one.
    pub fn toggle_sort(&mut self, field: &str) -> SortKey {
        self.flush_scroll();
        let key = self.query.toggle_sort(field).clone();
        self.recompute();
        key
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) -> Window {
        self.flush_scroll();
        self.query.set_sort(sort);
        self.recompute();
        self.window
    }

    pub fn clear_sort(&mut self) -> Window {
        self.set_sort(None)
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Toggle one row. Returns whether it is now selected.
    pub fn toggle_row(&mut self, id: RowId) -> bool {
        self.flush_scroll();
        self.selection.toggle(id)
    }

    /// Toggle-all over the rows currently windowed.
    pub fn select_all_visible(&mut self) {
        self.flush_scroll();
        let ids = self.visible_ids();
        trace!(rows = ids.len(), "select all visible");
        self.selection.select_all(&ids);
    }

    pub fn clear_selection(&mut self) {
        self.flush_scroll();
        self.selection.clear();
    }

    // ---------------------------------------------------------------------
    // Columns
    // ---------------------------------------------------------------------

    /// # Errors
    /// Returns `UnknownColumn` if no column has this id.
    pub fn toggle_column_visibility(&mut self, column: &str) -> Result<bool> {
        self.columns.toggle_visibility(column)
    }

    /// # Errors
    /// Returns `UnknownColumn` if no column has this id.
    pub fn toggle_column_freeze(&mut self, column: &str) -> Result<bool> {
        self.columns.toggle_freeze(column)
    }

    /// # Errors
    /// Returns `UnknownColumn` if no column has this id.
    pub fn resize_column(&mut self, column: &str, width: f32) -> Result<f32> {
        self.columns.resize(column, width)
    }

    pub fn set_columns(&mut self, columns: ColumnSet) {
        self.columns = columns;
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &SelectionLedger {
        &self.selection
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn processed_len(&self) -> usize {
        self.query.len()
    }

    /// Height of the scroll spacer: header plus every processed row.
    pub fn content_height(&self) -> f64 {
        self.viewport.content_height(self.query.len())
    }

    /// Processed row at processed index `index`.
    pub fn processed_row(&self, index: usize) -> Option<&Row> {
        self.query.row(&self.dataset, index)
    }

    /// Rows in the current window, in processed order.
    pub fn visible_rows(&self) -> Vec<&Row> {
        self.query.slice(&self.dataset, self.window.range())
    }

    pub fn visible_ids(&self) -> Vec<RowId> {
        self.visible_rows().iter().map(|row| row.id).collect()
    }

    /// Row under a y-coordinate measured from the top of the first row.
    pub fn row_at(&self, y: f64) -> Option<&Row> {
        self.viewport
            .row_at(y, self.query.len())
            .and_then(|index| self.processed_row(index))
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selection.is_selected(id)
    }

    /// Apply any queued scroll, then snapshot the window for rendering.
    pub fn render(&mut self) -> Frame<'_> {
        self.flush_scroll();
        self.frame()
    }

    /// Snapshot of the window for rendering.
    ///
    /// A scroll still queued with `queue_scroll` is not reflected; use
    /// [`TableView::render`] when scrolls may be pending.
    pub fn frame(&self) -> Frame<'_> {
        let row_height = self.viewport.row_height;
        let start = self.window.start_index;
        let rows: Vec<FrameRow<'_>> = self
            .visible_rows()
            .into_iter()
            .enumerate()
            .map(|(offset, row)| {
                let index = start + offset;
                FrameRow {
                    index,
                    id: row.id,
                    top: index as f64 * row_height,
                    selected: self.selection.is_selected(row.id),
                    row,
                }
            })
            .collect();
        let ids: Vec<RowId> = rows.iter().map(|r| r.id).collect();
        Frame {
            window: self.window,
            scroll_top: self.viewport.scroll_top,
            total_rows: self.query.len(),
            dataset_rows: self.dataset.len(),
            selected_count: self.selection.count(),
            header_check: self.selection.header_state(&ids),
            filter_text: self.query.filter_text(),
            column_filters: self.query.column_filters(),
            sort: self.query.sort(),
            columns: self.columns.render_order(),
            rows,
        }
    }
}
