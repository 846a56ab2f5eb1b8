//! The windowing engine: which rows to materialize for a scroll position.

use tracing::trace;

use crate::types::Window;

/// Compute the window of rows to render.
///
/// - `start_index = max(0, floor(scroll_top / row_height) - overscan)`
/// - `end_index = min(total_rows, ceil((scroll_top + viewport_height) / row_height) + overscan)`
/// - `offset_y = start_index * row_height`
/// - `total_height = total_rows * row_height`
///
/// Negative or NaN `scroll_top` is treated as 0. Over-scroll past the end
/// still yields a valid range: `start_index` is clamped to `end_index`, which
/// is clamped to `total_rows`. A non-positive `row_height` yields the empty
/// window.
// Float -> usize casts are safe: operands are clamped to >= 0 first, and `as`
// saturates at usize::MAX for huge or infinite values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn compute_window(
    scroll_top: f64,
    viewport_height: f64,
    row_height: f64,
    overscan: usize,
    total_rows: usize,
) -> Window {
    if total_rows == 0 || !(row_height.is_finite() && row_height > 0.0) {
        return Window::empty();
    }
    let scroll_top = non_negative(scroll_top);
    let viewport_height = non_negative(viewport_height);

    let first_visible = (scroll_top / row_height).floor() as usize;
    let last_visible = ((scroll_top + viewport_height) / row_height).ceil() as usize;

    let end_index = last_visible.saturating_add(overscan).min(total_rows);
    let start_index = first_visible.saturating_sub(overscan).min(end_index);

    let window = Window {
        start_index,
        end_index,
        offset_y: start_index as f64 * row_height,
        total_height: total_rows as f64 * row_height,
    };
    trace!(
        scroll_top,
        start = window.start_index,
        end = window.end_index,
        total_rows,
        "window"
    );
    window
}

/// Upper bound on `end_index - start_index` for a configuration.
///
/// One more than `ceil(viewport_height / row_height)` because a viewport that
/// starts mid-row straddles an extra row.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn max_span(viewport_height: f64, row_height: f64, overscan: usize) -> usize {
    if !(row_height.is_finite() && row_height > 0.0) {
        return 0;
    }
    let rows = (non_negative(viewport_height) / row_height).ceil() as usize;
    rows.saturating_add(1)
        .saturating_add(overscan.saturating_mul(2))
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        let w = compute_window(2000.0, 500.0, 40.0, 5, 100_000);
        assert_eq!(w.start_index, 45);
        assert_eq!(w.end_index, 68);
        assert_eq!(w.offset_y, 1800.0);
        assert_eq!(w.total_height, 4_000_000.0);
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(compute_window(1234.0, 500.0, 40.0, 5, 0), Window::empty());
    }

    #[test]
    fn test_nan_scroll_is_top() {
        let w = compute_window(f64::NAN, 500.0, 40.0, 5, 1000);
        assert_eq!(w.start_index, 0);
        assert_eq!(w.end_index, 18);
    }

    #[test]
    fn test_infinite_scroll_clamps() {
        let w = compute_window(f64::INFINITY, 500.0, 40.0, 5, 1000);
        assert_eq!(w.start_index, 1000);
        assert_eq!(w.end_index, 1000);
    }

    #[test]
    fn test_zero_row_height_is_empty() {
        assert!(compute_window(0.0, 500.0, 0.0, 5, 10).is_empty());
        assert_eq!(max_span(500.0, 0.0, 5), 0);
    }

    #[test]
    fn test_max_span() {
        assert_eq!(max_span(500.0, 40.0, 5), 13 + 1 + 10);
    }
}
