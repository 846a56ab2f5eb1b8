//! Query stage tests
//!
//! Filtering (case-insensitive substring over every field, id included),
//! sorting (numeric vs lexicographic, stability, absent fields) and the
//! memoized `QueryState`.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use fixtures::{amounts, ids, statuses, DatasetBuilder};
use rowview::query::{processed_positions, processed_positions_with};
use rowview::{
    compute_processed, number_text, ColumnFilters, Dataset, FieldValue, QueryState, Row, SortKey,
};
use test_case::test_case;

fn amount_values(rows: &[&Row]) -> Vec<i64> {
    rows.iter()
        .map(|r| match r.get("amount") {
            Some(FieldValue::Integer(v)) => *v,
            other => panic!("row {} has amount {:?}", r.id, other),
        })
        .collect()
}

// =============================================================================
// FILTER
// =============================================================================

#[test]
fn test_filter_active_matches_active_and_inactive() {
    let data = statuses();
    let processed = compute_processed(data.rows(), "active", None);
    let found: Vec<_> = processed
        .iter()
        .map(|r| r.get("status").unwrap().to_string())
        .collect();
    assert_eq!(found, vec!["Active", "Inactive"]);
}

#[test_case("ACTIVE" ; "upper needle")]
#[test_case("AcTiVe" ; "mixed needle")]
fn test_filter_is_case_insensitive(needle: &str) {
    let data = statuses();
    assert_eq!(ids(&compute_processed(data.rows(), needle, None)), vec![1, 3]);
}

#[test]
fn test_empty_filter_keeps_everything_in_order() {
    let data = Dataset::generate(200, 3);
    let processed = compute_processed(data.rows(), "", None);
    assert_eq!(processed.len(), 200);
    assert!(processed.iter().zip(data.rows()).all(|(a, b)| a.id == b.id));
}

#[test]
fn test_filter_matches_numbers_as_text() {
    let data = amounts(&[1500, 250, 15]);
    assert_eq!(ids(&compute_processed(data.rows(), "15", None)), vec![1, 3]);
}

#[test]
fn test_filter_matches_id() {
    let data = Dataset::generate(30, 0);
    let processed = compute_processed(data.rows(), "user 27", None);
    assert_eq!(ids(&processed), vec![27]);

    // The id itself is a searchable value even without a field containing it.
    let bare = DatasetBuilder::new()
        .row(&[("flag", FieldValue::Bool(true))])
        .row(&[("flag", FieldValue::Bool(false))])
        .build();
    assert_eq!(ids(&compute_processed(bare.rows(), "2", None)), vec![2]);
    assert_eq!(ids(&compute_processed(bare.rows(), "TRUE", None)), vec![1]);
}

#[test]
fn test_filter_without_match_is_empty() {
    let data = statuses();
    assert!(compute_processed(data.rows(), "zzz", None).is_empty());
}

#[test]
fn test_filter_is_idempotent() {
    let data = Dataset::generate(1000, 11);
    let once: Vec<Row> = compute_processed(data.rows(), "uk", None)
        .into_iter()
        .cloned()
        .collect();
    let twice = compute_processed(&once, "", None);
    assert_eq!(ids(&twice), once.iter().map(|r| r.id).collect::<Vec<_>>());
}

#[test]
fn test_processed_is_subsequence_of_dataset() {
    let data = Dataset::generate(500, 5);
    let positions = processed_positions(data.rows(), "pending", None);
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(positions.len() <= data.len());
    for position in positions {
        assert!(data.rows()[position].matches("pending"));
    }
}

#[test_case(-0.0, "0" ; "negative zero")]
#[test_case(10.0, "10" ; "integral float")]
#[test_case(-1.5, "-1.5" ; "negative fraction")]
#[test_case(0.000001, "0.000001" ; "smallest plain decimal")]
#[test_case(1.5e-7, "1.5e-7" ; "small exponent")]
#[test_case(1e21, "1e+21" ; "large exponent")]
#[test_case(-2.5e22, "-2.5e+22" ; "negative large exponent")]
#[test_case(123_456_789_012.5, "123456789012.5" ; "long plain decimal")]
#[test_case(f64::INFINITY, "Infinity" ; "infinity")]
#[test_case(f64::NAN, "NaN" ; "nan")]
fn test_number_text_follows_browser_formatting(value: f64, expected: &str) {
    assert_eq!(number_text(value), expected);
    assert_eq!(FieldValue::Number(value).to_string(), expected);
}

#[test]
fn test_filter_matches_numbers_as_displayed() {
    let data = DatasetBuilder::new()
        .row(&[("score", FieldValue::Number(-0.0))])
        .row(&[("score", FieldValue::Number(1e21))])
        .row(&[("score", FieldValue::Number(1e-7))])
        .build();
    assert_eq!(ids(&compute_processed(data.rows(), "-", None)), vec![3]);
    assert_eq!(ids(&compute_processed(data.rows(), "e+21", None)), vec![2]);
    assert_eq!(ids(&compute_processed(data.rows(), "000", None)), Vec::<u32>::new());
}

// =============================================================================
// COLUMN FILTERS
// =============================================================================

fn column_filters(pairs: &[(&str, &str)]) -> ColumnFilters {
    pairs
        .iter()
        .map(|(field, text)| (field.to_string(), text.to_string()))
        .collect()
}

#[test]
fn test_column_filter_matches_only_its_field() {
    let data = statuses();
    // Global "a" hits Ada's name and Cy's "Inactive"; the column filter only
    // looks at names.
    let global = processed_positions(data.rows(), "a", None);
    assert_eq!(global, vec![0, 2]);
    let by_name = processed_positions_with(data.rows(), "", &column_filters(&[("name", "A")]), None);
    assert_eq!(by_name, vec![0]);
}

#[test]
fn test_column_filters_and_global_filter_all_apply() {
    let data = statuses();
    let filters = column_filters(&[("status", "active")]);
    assert_eq!(processed_positions_with(data.rows(), "", &filters, None), vec![0, 2]);
    assert_eq!(processed_positions_with(data.rows(), "cy", &filters, None), vec![2]);

    let filters = column_filters(&[("status", "active"), ("amount", "1")]);
    assert_eq!(processed_positions_with(data.rows(), "", &filters, None), vec![0]);
}

#[test]
fn test_column_filter_absent_field_never_matches() {
    let data = DatasetBuilder::new()
        .row(&[("name", FieldValue::from("Ann"))])
        .row(&[("flag", FieldValue::Bool(true))])
        .build();
    let filters = column_filters(&[("name", "n")]);
    assert_eq!(processed_positions_with(data.rows(), "", &filters, None), vec![0]);
    let filters = column_filters(&[("missing", "n")]);
    assert!(processed_positions_with(data.rows(), "", &filters, None).is_empty());
}

#[test]
fn test_column_filter_on_id_and_empty_text_ignored() {
    let data = statuses();
    let filters = column_filters(&[("id", "2"), ("name", "")]);
    assert_eq!(processed_positions_with(data.rows(), "", &filters, None), vec![1]);
}

#[test]
fn test_column_filter_then_sort() {
    let data = amounts(&[30, 5, 13, 1, 12]);
    let filters = column_filters(&[("amount", "1")]);
    let positions =
        processed_positions_with(data.rows(), "", &filters, Some(&SortKey::desc("amount")));
    assert_eq!(positions, vec![2, 4, 3]);
}

// =============================================================================
// SORT
// =============================================================================

#[test]
fn test_sort_amount_asc_and_desc() {
    let data = amounts(&[50, 10, 30]);
    let asc = compute_processed(data.rows(), "", Some(&SortKey::asc("amount")));
    assert_eq!(amount_values(&asc), vec![10, 30, 50]);
    let desc = compute_processed(data.rows(), "", Some(&SortKey::desc("amount")));
    assert_eq!(amount_values(&desc), vec![50, 30, 10]);
}

#[test]
fn test_sort_numbers_numerically_not_lexically() {
    let data = amounts(&[9, 100, 20]);
    let asc = compute_processed(data.rows(), "", Some(&SortKey::asc("amount")));
    assert_eq!(amount_values(&asc), vec![9, 20, 100]);
}

#[test]
fn test_sort_mixed_integer_and_float() {
    let data = DatasetBuilder::new()
        .row(&[("score", FieldValue::Number(2.5))])
        .row(&[("score", FieldValue::Integer(2))])
        .row(&[("score", FieldValue::Integer(3))])
        .build();
    let asc = compute_processed(data.rows(), "", Some(&SortKey::asc("score")));
    assert_eq!(ids(&asc), vec![2, 1, 3]);
}

#[test]
fn test_sort_text_lexicographic() {
    let data = statuses();
    let asc = compute_processed(data.rows(), "", Some(&SortKey::asc("status")));
    assert_eq!(ids(&asc), vec![1, 3, 2], "Active < Inactive < Pending");
}

#[test]
fn test_sort_is_stable_both_directions() {
    let data = DatasetBuilder::new()
        .user("a", "Active", 1)
        .user("b", "Active", 2)
        .user("c", "Pending", 1)
        .user("d", "Active", 3)
        .user("e", "Pending", 2)
        .build();
    let asc = compute_processed(data.rows(), "", Some(&SortKey::asc("status")));
    assert_eq!(ids(&asc), vec![1, 2, 4, 3, 5]);
    let desc = compute_processed(data.rows(), "", Some(&SortKey::desc("status")));
    assert_eq!(ids(&desc), vec![3, 5, 1, 2, 4]);
}

#[test]
fn test_sort_by_id_field() {
    let data = Dataset::generate(5, 0);
    let desc = compute_processed(data.rows(), "", Some(&SortKey::desc("id")));
    assert_eq!(ids(&desc), vec![5, 4, 3, 2, 1]);
}

#[test]
fn test_sort_unknown_field_keeps_order() {
    let data = Dataset::generate(20, 0);
    let sorted = compute_processed(data.rows(), "", Some(&SortKey::asc("salary")));
    assert_eq!(ids(&sorted), (1..=20).collect::<Vec<_>>());
}

#[test]
fn test_filter_then_sort() {
    let data = DatasetBuilder::new()
        .user("a", "Active", 30)
        .user("b", "Pending", 5)
        .user("c", "Inactive", 10)
        .build();
    let processed = compute_processed(data.rows(), "active", Some(&SortKey::asc("amount")));
    assert_eq!(ids(&processed), vec![3, 1]);
}

#[test_case("amount", Some(SortKey::asc("amount")) ; "bare field")]
#[test_case("amount:desc", Some(SortKey::desc("amount")) ; "desc suffix")]
#[test_case("amount:sideways", None ; "bad direction")]
#[test_case(":asc", None ; "empty field")]
fn test_sort_key_parse(text: &str, expected: Option<SortKey>) {
    assert_eq!(SortKey::parse(text), expected);
}

// =============================================================================
// QUERY STATE
// =============================================================================

#[test]
fn test_query_state_tracks_inputs() {
    let data = Dataset::generate(300, 9);
    let mut query = QueryState::new(&data);
    assert_eq!(query.len(), 300);

    query.set_filter("germany");
    query.toggle_sort("amount");
    assert!(query.refresh(&data));
    assert_eq!(query.len(), 60);

    let rows = query.slice(&data, 0..query.len());
    let values = amount_values(&rows);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));

    query.toggle_sort("amount");
    query.refresh(&data);
    let values = amount_values(&query.slice(&data, 0..query.len()));
    assert!(values.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_query_state_matches_pure_function() {
    let data = Dataset::generate(400, 21);
    let mut query = QueryState::new(&data);
    query.set_filter("user 1");
    query.set_sort(Some(SortKey::desc("amount")));
    query.refresh(&data);

    let expected = compute_processed(data.rows(), "user 1", Some(&SortKey::desc("amount")));
    let actual = query.slice(&data, 0..query.len());
    assert_eq!(ids(&actual), ids(&expected));
}

#[test]
fn test_query_state_column_filter_invalidates_memo() {
    let data = Dataset::generate(300, 9);
    let mut query = QueryState::new(&data);
    query.set_filter("active");
    query.refresh(&data);
    assert_eq!(query.len(), 200);

    assert!(query.set_column_filter("status", "INACTIVE"));
    assert!(query.is_dirty());
    assert!(query.refresh(&data));
    assert_eq!(query.len(), 100);
    assert_eq!(query.column_filter("status"), Some("INACTIVE"));

    assert!(query.set_column_filter("country", "uk"));
    query.refresh(&data);
    assert_eq!(query.len(), 20);

    assert!(query.clear_column_filter("country"));
    assert!(query.refresh(&data));
    assert_eq!(query.len(), 100);

    assert!(query.clear_column_filters());
    assert!(query.refresh(&data));
    assert_eq!(query.len(), 200);
    assert!(query.column_filters().is_empty());
}

#[test]
fn test_clear_sort_restores_filter_order() {
    let data = Dataset::generate(50, 2);
    let mut query = QueryState::new(&data);
    query.toggle_sort("amount");
    query.refresh(&data);
    assert!(query.clear_sort());
    query.refresh(&data);
    assert_eq!(query.positions(), (0..50).collect::<Vec<_>>().as_slice());
}
