//! Column configuration: visibility, freezing and widths.
//!
//! Pure presentation state; the windowing engine never reads it.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, RowviewError};
use crate::types::Column;

/// Narrowest width a column can be resized to, in pixels.
pub const MIN_COLUMN_WIDTH: f32 = 40.0;

/// Ordered column configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Columns for the generated user dataset.
    pub fn user_defaults() -> Self {
        Self::new(vec![
            Column::new("id", "ID", 80.0),
            Column::new("name", "Name", 200.0),
            Column::new("email", "Email", 250.0),
            Column::new("country", "Country", 120.0),
            Column::new("status", "Status", 120.0),
            Column::new("amount", "Amount", 120.0),
        ])
    }

    /// One visible column per field name, labelled with the name itself.
    pub fn from_fields(fields: &[String]) -> Self {
        Self::new(
            fields
                .iter()
                .map(|field| Column::new(field, field, 120.0))
                .collect(),
        )
    }

    pub fn all(&self) -> &[Column] {
        &self.columns
    }

    pub fn get(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Column> {
        match self.columns.iter_mut().find(|c| c.id == id) {
            Some(column) => Ok(column),
            None => {
                warn!(column = id, "unknown column");
                Err(RowviewError::UnknownColumn(id.to_string()))
            }
        }
    }

    /// Show/hide a column. Returns the new visibility.
    ///
    /// # Errors
    /// Returns `UnknownColumn` if no column has this id.
    pub fn toggle_visibility(&mut self, id: &str) -> Result<bool> {
        let column = self.get_mut(id)?;
        column.visible = !column.visible;
        Ok(column.visible)
    }

    /// Freeze/unfreeze a column. Returns the new frozen state.
    ///
    /// # Errors
    /// Returns `UnknownColumn` if no column has this id.
    pub fn toggle_freeze(&mut self, id: &str) -> Result<bool> {
        let column = self.get_mut(id)?;
        column.frozen = !column.frozen;
        Ok(column.frozen)
    }

    /// Set a column width, clamped to [`MIN_COLUMN_WIDTH`]. Returns the applied width.
    ///
    /// # Errors
    /// Returns `UnknownColumn` if no column has this id.
    pub fn resize(&mut self, id: &str, width: f32) -> Result<f32> {
        let column = self.get_mut(id)?;
        column.width = if width.is_finite() {
            width.max(MIN_COLUMN_WIDTH)
        } else {
            MIN_COLUMN_WIDTH
        };
        Ok(column.width)
    }

    /// Visible columns in configured order.
    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.visible)
    }

    /// Visible frozen columns (pinned to the left edge).
    pub fn frozen(&self) -> impl Iterator<Item = &Column> {
        self.visible().filter(|c| c.frozen)
    }

    /// Visible columns that scroll horizontally.
    pub fn scrollable(&self) -> impl Iterator<Item = &Column> {
        self.visible().filter(|c| !c.frozen)
    }

    /// Visible columns in render order: frozen first, then scrollable.
    pub fn render_order(&self) -> Vec<&Column> {
        self.frozen().chain(self.scrollable()).collect()
    }

    pub fn frozen_width(&self) -> f32 {
        self.frozen().map(|c| c.width).sum()
    }

    pub fn total_width(&self) -> f32 {
        self.visible().map(|c| c.width).sum()
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
    fn test_defaults_width() {
        let columns = ColumnSet::user_defaults();
        assert_eq!(columns.total_width(), 890.0);
        assert_eq!(columns.frozen_width(), 0.0);
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut columns = ColumnSet::user_defaults();
        assert_eq!(columns.resize("name", 10.0).unwrap(), MIN_COLUMN_WIDTH);
        assert_eq!(columns.resize("name", f32::NAN).unwrap(), MIN_COLUMN_WIDTH);
        assert_eq!(columns.resize("name", 310.0).unwrap(), 310.0);
    }

    #[test]
    fn test_unknown_column() {
        let mut columns = ColumnSet::user_defaults();
        assert!(matches!(
            columns.toggle_freeze("salary"),
            Err(RowviewError::UnknownColumn(_))
        ));
    }
}
