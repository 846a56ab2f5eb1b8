//! rowview - virtualized table engine
//!
//! Keeps 100k-row tables interactive by materializing only the rows that
//! intersect the viewport:
//! - Windowing: scroll position → `{startIndex, endIndex, offsetY, totalHeight}`
//! - Query stage: case-insensitive global filter, then stable sort
//! - Selection ledger keyed by row id, surviving filter/sort/scroll
//! - Column visibility/freeze/width and pagination records for the UI
//!
//! # Usage (Rust)
//!
//! ```
//! use rowview::{Dataset, TableConfig, TableView};
//!
//! let mut table = TableView::new(Dataset::generate(100_000, 7), &TableConfig::default())?;
//! let window = table.on_scroll(2000.0);
//! assert_eq!((window.start_index, window.end_index), (45, 68));
//! # Ok::<(), rowview::RowviewError>(())
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { RowView } from 'rowview';
//! await init();
//! const view = new RowView();
//! view.generate(100000, 7);
//! container.onscroll = () => { view.onScroll(container.scrollTop); draw(view.frame()); };
//! ```

pub mod columns;
pub mod config;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod pagination;
pub mod query;
pub mod selection;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use columns::ColumnSet;
pub use config::TableConfig;
pub use dataset::Dataset;
pub use error::{Result, RowviewError};
pub use layout::{compute_window, Viewport};
pub use pagination::Pagination;
pub use query::{compute_processed, ColumnFilters, QueryState};
pub use selection::SelectionLedger;
pub use viewer::{Frame, RowView, TableEvent, TableView};

pub use types::*;

/// Compute the window for a scroll position and return it as a JS object
/// `{startIndex, endIndex, offsetY, totalHeight}`.
///
/// # Errors
/// Returns an error if the result cannot be converted to a JS value.
#[wasm_bindgen(js_name = "computeWindow")]
pub fn compute_window_js(
    scroll_top: f64,
    viewport_height: f64,
    row_height: f64,
    overscan: usize,
    total_rows: usize,
) -> std::result::Result<JsValue, JsValue> {
    let window = compute_window(scroll_top, viewport_height, row_height, overscan, total_rows);
    serde_wasm_bindgen::to_value(&window)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
