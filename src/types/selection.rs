use serde::{Deserialize, Serialize};

/// State of the header "select all" checkbox for the rows currently windowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderCheck {
    #[default]
    Unchecked,
    /// Some, but not all, windowed rows are selected
    Indeterminate,
    Checked,
}
