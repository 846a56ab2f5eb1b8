//! Query stage: derive the processed sequence (filter, then sort) from a dataset.
//!
//! A row survives when it matches the global filter text and every column
//! filter. The free functions are pure. [`QueryState`] owns the filter/sort
//! inputs and caches the processed positions, recomputing only when an input
//! changes.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use crate::dataset::Dataset;
use crate::types::{Row, SortDirection, SortKey};

/// Compare two rows by a sort key. Absent fields compare as smallest.
pub fn compare_rows(a: &Row, b: &Row, key: &SortKey) -> Ordering {
    let ordering = match (a.value(&key.field), b.value(&key.field)) {
        (Some(x), Some(y)) => x.compare(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    match key.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Per-column filter text keyed by field name.
pub type ColumnFilters = BTreeMap<String, String>;

/// Logical positions of the rows that survive the filter, in sorted order.
///
/// Sorting is stable in both directions: ties keep their filtered order.
pub fn processed_positions(rows: &[Row], filter_text: &str, sort: Option<&SortKey>) -> Vec<usize> {
    processed_positions_with(rows, filter_text, &ColumnFilters::new(), sort)
}

/// Like [`processed_positions`], additionally requiring each column filter
/// to match its field. Empty column filter texts are ignored.
pub fn processed_positions_with(
    rows: &[Row],
    filter_text: &str,
    column_filters: &ColumnFilters,
    sort: Option<&SortKey>,
) -> Vec<usize> {
    let needle = filter_text.to_lowercase();
    let column_needles: Vec<(&str, String)> = column_filters
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(field, text)| (field.as_str(), text.to_lowercase()))
        .collect();
    let mut positions: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            row.matches(&needle)
                && column_needles
                    .iter()
                    .all(|(field, needle)| row.field_matches(field, needle))
        })
        .map(|(position, _)| position)
        .collect();

    if let Some(key) = sort {
        positions.sort_by(|&a, &b| match (rows.get(a), rows.get(b)) {
            (Some(ra), Some(rb)) => compare_rows(ra, rb, key),
            _ => Ordering::Equal,
        });
    }
    positions
}

/// Dataset after applying the filter text and then the sort key.
pub fn compute_processed<'a>(
    rows: &'a [Row],
    filter_text: &str,
    sort: Option<&SortKey>,
) -> Vec<&'a Row> {
    processed_positions(rows, filter_text, sort)
        .into_iter()
        .filter_map(|position| rows.get(position))
        .collect()
}

/// Filter/sort inputs plus the memoized processed sequence.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    filter_text: String,
    column_filters: ColumnFilters,
    sort: Option<SortKey>,
    positions: Vec<usize>,
    dirty: bool,
}

impl QueryState {
    /// Create a query over `dataset` with no filter and no sort.
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            filter_text: String::new(),
            column_filters: ColumnFilters::new(),
            sort: None,
            positions: (0..dataset.len()).collect(),
            dirty: false,
        }
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    /// Set the filter text. Returns true if it changed.
    pub fn set_filter(&mut self, text: &str) -> bool {
        if self.filter_text == text {
            return false;
        }
        self.filter_text = text.to_string();
        self.dirty = true;
        true
    }

    pub fn column_filters(&self) -> &ColumnFilters {
        &self.column_filters
    }

    pub fn column_filter(&self, column: &str) -> Option<&str> {
        self.column_filters.get(column).map(String::as_str)
    }

    /// Set the filter text for one column; empty text removes it.
    /// Returns true if it changed.
    pub fn set_column_filter(&mut self, column: &str, text: &str) -> bool {
        if text.is_empty() {
            return self.clear_column_filter(column);
        }
        if self.column_filter(column) == Some(text) {
            return false;
        }
        self.column_filters
            .insert(column.to_string(), text.to_string());
        self.dirty = true;
        true
    }

    /// Remove one column filter. Returns true if there was one.
    pub fn clear_column_filter(&mut self, column: &str) -> bool {
        if self.column_filters.remove(column).is_none() {
            return false;
        }
        self.dirty = true;
        true
    }

    /// Remove every column filter. Returns true if there were any.
    pub fn clear_column_filters(&mut self) -> bool {
        if self.column_filters.is_empty() {
            return false;
        }
        self.column_filters.clear();
        self.dirty = true;
        true
    }

    /// Replace the sort key. Returns true if it changed.
    pub fn set_sort(&mut self, sort: Option<SortKey>) -> bool {
        if self.sort == sort {
            return false;
        }
        self.sort = sort;
        self.dirty = true;
        true
    }

    /// Header-click behavior: ascending on a new field, flip on the same field.
    pub fn toggle_sort(&mut self, field: &str) -> &SortKey {
        let direction = match &self.sort {
            Some(current) if current.field == field => current.direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.dirty = true;
        self.sort.insert(SortKey {
            field: field.to_string(),
            direction,
        })
    }

    pub fn clear_sort(&mut self) -> bool {
        self.set_sort(None)
    }

    /// Mark the cache stale, e.g. after the dataset was swapped.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recompute the processed sequence if any input changed.
    ///
    /// Returns true when a recompute happened.
    pub fn refresh(&mut self, dataset: &Dataset) -> bool {
        if !self.dirty {
            return false;
        }
        self.positions = processed_positions_with(
            dataset.rows(),
            &self.filter_text,
            &self.column_filters,
            self.sort.as_ref(),
        );
        self.dirty = false;
        debug!(
            rows_in = dataset.len(),
            rows_out = self.positions.len(),
            filter = %self.filter_text,
            column_filters = self.column_filters.len(),
            sort = ?self.sort,
            "recomputed processed sequence"
        );
        true
    }

    /// Number of rows in the processed sequence.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Dataset positions in processed order.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Row at a processed index.
    pub fn row<'a>(&self, dataset: &'a Dataset, index: usize) -> Option<&'a Row> {
        self.positions
            .get(index)
            .and_then(|&position| dataset.get(position))
    }

    /// Rows for a range of processed indices, clamped to the sequence.
    pub fn slice<'a>(&self, dataset: &'a Dataset, range: std::ops::Range<usize>) -> Vec<&'a Row> {
        let end = range.end.min(self.positions.len());
        let start = range.start.min(end);
        self.positions
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .filter_map(|&position| dataset.get(position))
            .collect()
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

    fn amounts(rows: &[&Row]) -> Vec<i64> {
        rows.iter()
            .map(|r| match r.get("amount") {
                Some(crate::types::FieldValue::Integer(i)) => *i,
                other => panic!("unexpected amount {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_toggle_sort_flips_same_field() {
        let data = Dataset::generate(3, 0);
        let mut query = QueryState::new(&data);
        assert_eq!(query.toggle_sort("amount").direction, SortDirection::Asc);
        assert_eq!(query.toggle_sort("amount").direction, SortDirection::Desc);
        assert_eq!(query.toggle_sort("amount").direction, SortDirection::Asc);
        assert_eq!(query.toggle_sort("name").direction, SortDirection::Asc);
    }

    #[test]
    fn test_refresh_only_when_dirty() {
        let data = Dataset::generate(10, 0);
        let mut query = QueryState::new(&data);
        assert!(!query.refresh(&data));
        assert!(query.set_filter("user 1"));
        assert!(query.refresh(&data));
        assert!(!query.refresh(&data));
        assert!(!query.set_filter("user 1"));
        assert!(!query.is_dirty());
    }

    #[test]
    fn test_missing_field_sorts_first() {
        let rows = vec![
            Row::new(1).with("amount", 5),
            Row::new(2),
            Row::new(3).with("amount", 1),
        ];
        let processed = compute_processed(&rows, "", Some(&SortKey::asc("amount")));
        let ids: Vec<_> = processed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(amounts(&processed[1..]), vec![1, 5]);
    }

    #[test]
    fn test_column_filter_change_detection() {
        let data = Dataset::generate(10, 0);
        let mut query = QueryState::new(&data);
        assert!(query.set_column_filter("status", "pend"));
        assert!(query.is_dirty());
        assert!(query.refresh(&data));
        assert!(!query.set_column_filter("status", "pend"));
        assert!(!query.is_dirty());

        assert!(query.set_column_filter("status", ""));
        assert_eq!(query.column_filter("status"), None);
        assert!(!query.clear_column_filter("status"));
        assert!(!query.clear_column_filters());
    }

    #[test]
    fn test_slice_clamps() {
        let data = Dataset::generate(5, 0);
        let query = QueryState::new(&data);
        assert_eq!(query.slice(&data, 3..99).len(), 2);
        assert!(query.slice(&data, 7..9).is_empty());
    }
}
