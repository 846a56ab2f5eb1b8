//! Structured error types for rowview.
//!
//! The windowing, query and selection computations never fail; errors only
//! come from the edges (configuration, dataset loading, event decoding, I/O).

use crate::types::RowId;

/// All errors that can occur while configuring or feeding a table.
#[derive(Debug, thiserror::Error)]
pub enum RowviewError {
    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Column id not present in the column set.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Event payload could not be decoded.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Two rows share an id.
    #[error("Duplicate row id: {0}")]
    DuplicateId(RowId),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RowviewError>;

#[cfg(target_arch = "wasm32")]
impl From<RowviewError> for wasm_bindgen::JsValue {
    fn from(e: RowviewError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_convert() {
        fn open_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/rowview/data.json")?)
        }
        let err = open_missing().unwrap_err();
        assert!(matches!(err, RowviewError::Io(_)));
        assert!(err.to_string().starts_with("I/O error: "));
    }

    #[test]
    fn test_duplicate_id_message() {
        assert_eq!(RowviewError::DuplicateId(7).to_string(), "Duplicate row id: 7");
    }
}
