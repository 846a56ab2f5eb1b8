//! Browser smoke tests for the exported `RowView`.
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use rowview::RowView;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_generate_scroll_and_select() {
    let mut view = RowView::new(None).unwrap();
    view.generate(100_000, 7);
    assert_eq!(view.processed_len(), 100_000);

    view.on_scroll(2000.0).unwrap();
    view.select_all_visible();
    assert_eq!(view.selected_count(), 23);

    view.set_filter("pending");
    assert!(view.processed_len() < 100_000);
    assert_eq!(view.selected_count(), 23);
}

#[wasm_bindgen_test]
fn test_config_errors_surface_as_js_errors() {
    let result = RowView::new(Some(r#"{"rowHeight": 0}"#.to_string()));
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn test_frame_is_plain_object() {
    let mut view = RowView::new(None).unwrap();
    view.generate(50, 1);
    let frame = view.frame().unwrap();
    let window = js_sys::Reflect::get(&frame, &JsValue::from_str("window")).unwrap();
    let end = js_sys::Reflect::get(&window, &JsValue::from_str("endIndex")).unwrap();
    assert_eq!(end.as_f64(), Some(18.0));
}

#[wasm_bindgen_test]
fn test_frame_reflects_queued_scroll() {
    let mut view = RowView::new(None).unwrap();
    view.generate(100_000, 7);
    view.queue_scroll(2000.0);
    let frame = view.frame().unwrap();
    let window = js_sys::Reflect::get(&frame, &JsValue::from_str("window")).unwrap();
    let start = js_sys::Reflect::get(&window, &JsValue::from_str("startIndex")).unwrap();
    assert_eq!(start.as_f64(), Some(45.0));
}

#[wasm_bindgen_test]
fn test_set_column_filter() {
    let mut view = RowView::new(None).unwrap();
    view.generate(1000, 7);
    view.set_column_filter("status", "pend");
    assert_eq!(view.processed_len(), 333);
    view.set_column_filter("status", "");
    assert_eq!(view.processed_len(), 1000);
}
