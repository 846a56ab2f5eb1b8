//! Table configuration: the fixed part of the viewport state.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RowviewError};

/// Fixed geometry of a virtualized table.
///
/// Every field has a default, so a partial JSON object such as
/// `{"rowHeight": 32}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Height of every row in pixels
    pub row_height: f64,
    /// Height of the scroll container in pixels
    pub viewport_height: f64,
    /// Rows rendered beyond each edge of the viewport
    pub overscan: usize,
    /// Sticky header height, added to the scrollable content height
    pub header_height: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_height: 40.0,
            viewport_height: 500.0,
            overscan: 5,
            header_height: 40.0,
        }
    }
}

impl TableConfig {
    /// Parse a JSON configuration object and validate it.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that heights are finite and positive.
    ///
    /// # Errors
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(RowviewError::InvalidConfig(format!(
                "rowHeight must be positive, got {}",
                self.row_height
            )));
        }
        if !(self.viewport_height.is_finite() && self.viewport_height > 0.0) {
            return Err(RowviewError::InvalidConfig(format!(
                "viewportHeight must be positive, got {}",
                self.viewport_height
            )));
        }
        if !(self.header_height.is_finite() && self.header_height >= 0.0) {
            return Err(RowviewError::InvalidConfig(format!(
                "headerHeight must be non-negative, got {}",
                self.header_height
            )));
        }
        Ok(())
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
    fn test_partial_json_uses_defaults() {
        let config = TableConfig::from_json(r#"{"rowHeight": 32}"#).unwrap();
        assert_eq!(config.row_height, 32.0);
        assert_eq!(config.viewport_height, 500.0);
        assert_eq!(config.overscan, 5);
    }

    #[test]
    fn test_rejects_zero_row_height() {
        let err = TableConfig::from_json(r#"{"rowHeight": 0}"#).unwrap_err();
        assert!(matches!(err, RowviewError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_negative_overscan_at_parse() {
        // overscan is unsigned, so a negative value never reaches the engine
        let err = TableConfig::from_json(r#"{"overscan": -1}"#).unwrap_err();
        assert!(matches!(err, RowviewError::Json(_)));
    }
}
