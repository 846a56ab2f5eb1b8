//! The row store: an immutable, cheaply shared sequence of rows.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, RowviewError};
use crate::types::{Row, RowId, ID_FIELD};

const STATUSES: [&str; 3] = ["Active", "Pending", "Inactive"];
const COUNTRIES: [&str; 5] = ["USA", "UK", "Canada", "Germany", "France"];

/// Ordered rows, indexed by logical position.
///
/// Cloning shares the underlying rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Arc<[Row]>,
}

/// First id that appears more than once, if any.
pub fn first_duplicate_id(rows: &[Row]) -> Option<RowId> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter().map(|row| row.id).find(|&id| !seen.insert(id))
}

impl Dataset {
    /// Wrap rows that are already known to have unique ids.
    ///
    /// Selection is keyed by id, so callers must not pass duplicates; use
    /// [`Dataset::try_from_rows`] for untrusted input.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        debug_assert!(
            first_duplicate_id(&rows).is_none(),
            "Dataset::from_rows called with duplicate ids"
        );
        Self { rows: rows.into() }
    }

    /// Wrap rows, rejecting duplicate ids.
    ///
    /// # Errors
    /// Returns `DuplicateId` naming the first repeated id.
    pub fn try_from_rows(rows: Vec<Row>) -> Result<Self> {
        if let Some(id) = first_duplicate_id(&rows) {
            return Err(RowviewError::DuplicateId(id));
        }
        Ok(Self { rows: rows.into() })
    }

    /// Load a JSON array of flat row objects.
    ///
    /// # Errors
    /// Returns an error if the JSON is not an array of objects with an `id`,
    /// or `DuplicateId` if two objects share one.
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<Row> = serde_json::from_str(json)?;
        debug!(rows = rows.len(), "loaded dataset from JSON");
        Self::try_from_rows(rows)
    }

    /// Generate `count` mock user records.
    ///
    /// Ids run from 1, `status` and `country` cycle, `amount` is drawn from
    /// `0..10000` with a seeded generator so runs are reproducible.
    pub fn generate(count: u32, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let rows: Vec<Row> = (0..count)
            .map(|i| {
                let id = i + 1;
                let status = STATUSES.get(i as usize % STATUSES.len()).copied();
                let country = COUNTRIES.get(i as usize % COUNTRIES.len()).copied();
                Row::new(id)
                    .with("name", format!("User {id}"))
                    .with("email", format!("user{id}@example.com"))
                    .with("status", status.unwrap_or_default())
                    .with("amount", rng.u32(0..10_000))
                    .with("country", country.unwrap_or_default())
            })
            .collect();
        debug!(rows = rows.len(), seed, "generated dataset");
        Self::from_rows(rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Distinct field names across all rows, `id` first.
    pub fn field_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .rows
            .iter()
            .flat_map(|row| row.fields.keys().map(String::as_str))
            .collect();
        std::iter::once(ID_FIELD)
            .chain(names.into_iter().filter(|name| *name != ID_FIELD))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::from_rows(Vec::new())
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Self::from_rows(rows)
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
    use crate::types::FieldValue;

    #[test]
    fn test_generate_shape() {
        let data = Dataset::generate(6, 7);
        assert_eq!(data.len(), 6);
        let first = data.get(0).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.get("name"), Some(&FieldValue::from("User 1")));
        assert_eq!(
            first.get("email"),
            Some(&FieldValue::from("user1@example.com"))
        );
        let statuses: Vec<_> = data.rows().iter().map(|r| r.get("status")).collect();
        assert_eq!(statuses[0], Some(&FieldValue::from("Active")));
        assert_eq!(statuses[1], Some(&FieldValue::from("Pending")));
        assert_eq!(statuses[2], Some(&FieldValue::from("Inactive")));
        assert_eq!(data.get(5).unwrap().get("country"), Some(&FieldValue::from("USA")));
    }

    #[test]
    fn test_generate_is_reproducible() {
        let a = Dataset::generate(50, 42);
        let b = Dataset::generate(50, 42);
        assert_eq!(a.rows(), b.rows());
    }

    #[test]
    fn test_amount_range() {
        let data = Dataset::generate(500, 1);
        for row in data.rows() {
            let amount = row.get("amount").and_then(FieldValue::as_f64).unwrap();
            assert!((0.0..10_000.0).contains(&amount));
        }
    }

    #[test]
    fn test_from_json_drops_non_scalar_fields() {
        let data = Dataset::from_json(
            r#"[{"id": 3, "name": "Ada", "tags": ["x"], "note": null, "score": 1.5}]"#,
        )
        .unwrap();
        let row = data.get(0).unwrap();
        assert_eq!(row.id, 3);
        assert!(row.get("tags").is_none());
        assert!(row.get("note").is_none());
        assert_eq!(row.get("score"), Some(&FieldValue::Number(1.5)));
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let err = Dataset::from_json(r#"[{"id": 1}, {"id": 2}, {"id": 1}, {"id": 2}]"#)
            .unwrap_err();
        assert!(matches!(err, RowviewError::DuplicateId(1)));
    }

    #[test]
    fn test_try_from_rows() {
        assert!(Dataset::try_from_rows(vec![Row::new(1), Row::new(2)]).is_ok());
        assert!(matches!(
            Dataset::try_from_rows(vec![Row::new(5), Row::new(5)]),
            Err(RowviewError::DuplicateId(5))
        ));
        assert_eq!(first_duplicate_id(&[]), None);
    }

    #[test]
    fn test_field_names_id_first() {
        let data = Dataset::generate(2, 0);
        assert_eq!(
            data.field_names(),
            vec!["id", "amount", "country", "email", "name", "status"]
        );
    }
}
