//! Column configuration and pagination tests

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use rowview::pagination::PAGE_SIZES;
use rowview::{Column, ColumnSet, Pagination, RowviewError};
use test_case::test_case;

// =============================================================================
// COLUMNS
// =============================================================================

#[test]
fn test_user_defaults_order_and_widths() {
    let columns = ColumnSet::user_defaults();
    let summary: Vec<(&str, f32)> = columns
        .all()
        .iter()
        .map(|c| (c.id.as_str(), c.width))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("id", 80.0),
            ("name", 200.0),
            ("email", 250.0),
            ("country", 120.0),
            ("status", 120.0),
            ("amount", 120.0),
        ]
    );
    assert!(columns.all().iter().all(|c| c.visible && !c.frozen));
}

#[test]
fn test_toggle_visibility_round_trip() {
    let mut columns = ColumnSet::user_defaults();
    assert!(!columns.toggle_visibility("email").unwrap());
    assert_eq!(columns.visible().count(), 5);
    assert_eq!(columns.total_width(), 640.0);
    assert!(columns.toggle_visibility("email").unwrap());
    assert_eq!(columns.visible().count(), 6);
}

#[test]
fn test_freeze_partitions_visible_columns() {
    let mut columns = ColumnSet::user_defaults();
    columns.toggle_freeze("amount").unwrap();
    columns.toggle_freeze("id").unwrap();
    let frozen: Vec<&str> = columns.frozen().map(|c| c.id.as_str()).collect();
    assert_eq!(frozen, vec!["id", "amount"]);
    assert_eq!(columns.frozen_width(), 200.0);
    assert_eq!(columns.scrollable().count(), 4);

    // Hidden frozen columns leave the frozen region.
    columns.toggle_visibility("id").unwrap();
    assert_eq!(columns.frozen_width(), 120.0);
}

#[test]
fn test_unknown_column_is_error() {
    let mut columns = ColumnSet::user_defaults();
    assert!(matches!(
        columns.resize("salary", 100.0),
        Err(RowviewError::UnknownColumn(name)) if name == "salary"
    ));
}

#[test]
fn test_columns_deserialize_with_defaults() {
    let columns: ColumnSet =
        serde_json::from_str(r#"[{"id": "name", "label": "Name", "width": 150}]"#).unwrap();
    assert_eq!(columns.all(), &[Column::new("name", "Name", 150.0)]);
}

// =============================================================================
// PAGINATION
// =============================================================================

#[test_case(0, 1 ; "empty still has one page")]
#[test_case(10, 1 ; "exact single page")]
#[test_case(11, 2 ; "one spill row")]
#[test_case(1000, 100 ; "many pages")]
fn test_page_count(total_rows: usize, pages: usize) {
    assert_eq!(Pagination::default().page_count(total_rows), pages);
}

#[test]
fn test_page_navigation() {
    let mut pages = Pagination::new(20).unwrap();
    assert!(!pages.can_previous());
    assert_eq!(pages.page_range(45), 0..20);
    pages.next_page(45);
    pages.next_page(45);
    assert_eq!(pages.page_range(45), 40..45);
    assert!(!pages.can_next(45));
    pages.next_page(45);
    assert_eq!(pages.page_index, 2);
    pages.previous_page();
    assert_eq!(pages.page_index, 1);
    pages.last_page(45);
    assert_eq!(pages.page_index, 2);
    pages.first_page();
    assert_eq!(pages.page_index, 0);
}

#[test]
fn test_clamp_after_filter_shrinks() {
    let mut pages = Pagination::default();
    pages.last_page(1000);
    assert_eq!(pages.page_index, 99);
    pages.clamp(35);
    assert_eq!(pages.page_index, 3);
    assert_eq!(pages.page_range(35), 30..35);
}

#[test]
fn test_page_size_change() {
    let mut pages = Pagination::default();
    pages.next_page(100);
    for size in PAGE_SIZES {
        pages.set_page_size(size).unwrap();
        assert_eq!(pages.page_index, 0);
        assert_eq!(pages.page_range(100).len(), size);
    }
    assert!(matches!(
        pages.set_page_size(0),
        Err(RowviewError::InvalidConfig(_))
    ));
}
