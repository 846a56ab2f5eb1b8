use serde::{Deserialize, Serialize};
use std::ops::Range;

/// The contiguous slice of the processed sequence to materialize.
///
/// Rows `start_index..end_index` are rendered, translated down by `offset_y`
/// inside a spacer of `total_height`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub start_index: usize,
    pub end_index: usize,
    pub offset_y: f64,
    pub total_height: f64,
}

impl Window {
    /// Window over an empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows in the window. Zero if `start_index > end_index`.
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}
