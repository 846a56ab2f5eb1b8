//! Dataset builders shared by the integration tests.

#![allow(dead_code)]

use rowview::{Dataset, FieldValue, Row, RowId};

/// Builder for small hand-written datasets.
#[derive(Default)]
pub struct DatasetBuilder {
    rows: Vec<Row>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row with the next id (1-based) and the given fields.
    pub fn row(mut self, fields: &[(&str, FieldValue)]) -> Self {
        let id = RowId::try_from(self.rows.len() + 1).unwrap_or(RowId::MAX);
        let row = fields
            .iter()
            .fold(Row::new(id), |row, (name, value)| row.with(name, value.clone()));
        self.rows.push(row);
        self
    }

    /// Add a user row with name, status and amount.
    pub fn user(self, name: &str, status: &str, amount: i64) -> Self {
        self.row(&[
            ("name", FieldValue::from(name)),
            ("status", FieldValue::from(status)),
            ("amount", FieldValue::from(amount)),
        ])
    }

    pub fn build(self) -> Dataset {
        Dataset::from_rows(self.rows)
    }
}

/// Rows with `amount` values in the given order, ids 1..=n.
pub fn amounts(values: &[i64]) -> Dataset {
    values
        .iter()
        .fold(DatasetBuilder::new(), |b, &amount| {
            b.row(&[("amount", FieldValue::from(amount))])
        })
        .build()
}

/// Three rows whose status is Active, Pending, Inactive.
pub fn statuses() -> Dataset {
    DatasetBuilder::new()
        .user("Ada", "Active", 10)
        .user("Bob", "Pending", 20)
        .user("Cy", "Inactive", 30)
        .build()
}

pub fn ids(rows: &[&Row]) -> Vec<RowId> {
    rows.iter().map(|r| r.id).collect()
}
