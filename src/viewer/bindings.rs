//! `RowView` - the WASM-exported face of `TableView`.
//!
//! JavaScript owns the DOM: it forwards scroll/input/click events here and
//! renders whatever `frame()` returns. Structured values cross the boundary
//! as plain JS objects via `serde-wasm-bindgen`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{TableEvent, TableView};
use crate::columns::ColumnSet;
use crate::config::TableConfig;
use crate::dataset::Dataset;

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn js_err(e: &crate::error::RowviewError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Virtualized table handle exported to JavaScript.
#[wasm_bindgen]
pub struct RowView {
    table: TableView,
}

#[wasm_bindgen]
impl RowView {
    /// Create an empty table. `config_json` is an optional partial
    /// configuration such as `{"rowHeight": 32, "overscan": 8}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<RowView, JsValue> {
        console_error_panic_hook::set_once();
        let config = match config_json {
            Some(json) => TableConfig::from_json(&json).map_err(|e| js_err(&e))?,
            None => TableConfig::default(),
        };
        let table = TableView::new(Dataset::default(), &config).map_err(|e| js_err(&e))?;
        Ok(RowView { table })
    }

    /// Load a JSON array of flat row objects.
    #[wasm_bindgen(js_name = "loadJson")]
    pub fn load_json(&mut self, json: &str) -> Result<(), JsValue> {
        let dataset = Dataset::from_json(json).map_err(|e| js_err(&e))?;
        let columns = ColumnSet::from_fields(&dataset.field_names());
        self.table.load(dataset);
        self.table.set_columns(columns);
        Ok(())
    }

    /// Load `count` generated user rows with the matching default columns.
    pub fn generate(&mut self, count: u32, seed: u32) {
        self.table.load(Dataset::generate(count, u64::from(seed)));
        self.table.set_columns(ColumnSet::user_defaults());
    }

    /// Replace the column configuration (array of column objects).
    #[wasm_bindgen(js_name = "setColumns")]
    pub fn set_columns(&mut self, columns: JsValue) -> Result<(), JsValue> {
        let columns: ColumnSet = serde_wasm_bindgen::from_value(columns)
            .map_err(|e| JsValue::from_str(&format!("Invalid columns: {e}")))?;
        self.table.set_columns(columns);
        Ok(())
    }

    #[wasm_bindgen(js_name = "onScroll")]
    pub fn on_scroll(&mut self, scroll_top: f64) -> Result<JsValue, JsValue> {
        to_js(&self.table.on_scroll(scroll_top))
    }

    /// Record a scroll position; applied on the next `flushScroll` or mutation.
    #[wasm_bindgen(js_name = "queueScroll")]
    pub fn queue_scroll(&mut self, scroll_top: f64) {
        self.table.queue_scroll(scroll_top);
    }

    /// Apply the latest queued scroll. Returns true if one was pending.
    #[wasm_bindgen(js_name = "flushScroll")]
    pub fn flush_scroll(&mut self) -> bool {
        self.table.flush_scroll().is_some()
    }

    #[wasm_bindgen(js_name = "setFilter")]
    pub fn set_filter(&mut self, text: &str) {
        self.table.set_filter(text);
    }

    /// Filter one column by substring; an empty string removes the filter.
    #[wasm_bindgen(js_name = "setColumnFilter")]
    pub fn set_column_filter(&mut self, column: &str, text: &str) {
        self.table.set_column_filter(column, text);
    }

    #[wasm_bindgen(js_name = "clearColumnFilters")]
    pub fn clear_column_filters(&mut self) {
        self.table.clear_column_filters();
    }

    /// Header click on `field`. Returns the active sort key.
    #[wasm_bindgen(js_name = "toggleSort")]
    pub fn toggle_sort(&mut self, field: &str) -> Result<JsValue, JsValue> {
        to_js(&self.table.toggle_sort(field))
    }

    #[wasm_bindgen(js_name = "clearSort")]
    pub fn clear_sort(&mut self) {
        self.table.clear_sort();
    }

    #[wasm_bindgen(js_name = "toggleRow")]
    pub fn toggle_row(&mut self, id: u32) -> bool {
        self.table.toggle_row(id)
    }

    #[wasm_bindgen(js_name = "selectAllVisible")]
    pub fn select_all_visible(&mut self) {
        self.table.select_all_visible();
    }

    #[wasm_bindgen(js_name = "clearSelection")]
    pub fn clear_selection(&mut self) {
        self.table.clear_selection();
    }

    #[wasm_bindgen(js_name = "isSelected")]
    pub fn is_selected(&self, id: u32) -> bool {
        self.table.is_selected(id)
    }

    #[wasm_bindgen(js_name = "selectedCount")]
    pub fn selected_count(&self) -> usize {
        self.table.selection().count()
    }

    #[wasm_bindgen(js_name = "selectedIds")]
    pub fn selected_ids(&self) -> Vec<u32> {
        self.table.selection().selected_ids()
    }

    #[wasm_bindgen(js_name = "toggleColumnVisibility")]
    pub fn toggle_column_visibility(&mut self, column: &str) -> Result<bool, JsValue> {
        self.table
            .toggle_column_visibility(column)
            .map_err(|e| js_err(&e))
    }

    #[wasm_bindgen(js_name = "toggleColumnFreeze")]
    pub fn toggle_column_freeze(&mut self, column: &str) -> Result<bool, JsValue> {
        self.table
            .toggle_column_freeze(column)
            .map_err(|e| js_err(&e))
    }

    #[wasm_bindgen(js_name = "resizeColumn")]
    pub fn resize_column(&mut self, column: &str, width: f32) -> Result<f32, JsValue> {
        self.table
            .resize_column(column, width)
            .map_err(|e| js_err(&e))
    }

    /// Apply a single event object, e.g. `{type: "filter", text: "uk"}`.
    pub fn dispatch(&mut self, event: JsValue) -> Result<(), JsValue> {
        let event: TableEvent = serde_wasm_bindgen::from_value(event)
            .map_err(|e| JsValue::from_str(&format!("Invalid event: {e}")))?;
        self.table.dispatch(&event).map_err(|e| js_err(&e))
    }

    /// Current window `{startIndex, endIndex, offsetY, totalHeight}`,
    /// after applying any queued scroll.
    pub fn window(&mut self) -> Result<JsValue, JsValue> {
        self.table.flush_scroll();
        to_js(&self.table.window())
    }

    /// Snapshot of the windowed rows for rendering, after applying any
    /// queued scroll.
    pub fn frame(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.table.render())
    }

    #[wasm_bindgen(js_name = "refreshWithMetrics")]
    pub fn refresh_with_metrics(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.table.refresh_with_metrics())
    }

    #[wasm_bindgen(js_name = "processedLen")]
    pub fn processed_len(&self) -> usize {
        self.table.processed_len()
    }

    #[wasm_bindgen(js_name = "datasetLen")]
    pub fn dataset_len(&self) -> usize {
        self.table.dataset().len()
    }

    /// Height of the scroll spacer (header plus rows).
    #[wasm_bindgen(js_name = "contentHeight")]
    pub fn content_height(&self) -> f64 {
        self.table.content_height()
    }
}
