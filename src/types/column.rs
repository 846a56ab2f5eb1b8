use serde::{Deserialize, Serialize};

/// Presentation settings for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Field name rendered in this column
    pub id: String,
    /// Header label
    pub label: String,
    /// Width in pixels
    pub width: f32,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub frozen: bool,
}

fn default_true() -> bool {
    true
}

impl Column {
    pub fn new(id: &str, label: &str, width: f32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            width,
            visible: true,
            frozen: false,
        }
    }
}
