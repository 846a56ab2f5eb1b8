//! Input events for `TableView`, applied strictly in arrival order.
//!
//! Events deserialize from JSON tagged by `type`, e.g.
//! `{"type": "scroll", "scrollTop": 2000}` or `{"type": "filter", "text": "active"}`.

use serde::{Deserialize, Serialize};

use super::TableView;
use crate::error::{Result, RowviewError};
use crate::types::RowId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TableEvent {
    Scroll { scroll_top: f64 },
    Filter { text: String },
    /// Empty `text` removes the column's filter
    ColumnFilter { column: String, text: String },
    /// Sort header click
    Sort { field: String },
    ClearSort,
    ToggleRow { id: RowId },
    SelectAllVisible,
    ClearSelection,
    ToggleColumnVisibility { column: String },
    ToggleColumnFreeze { column: String },
    ResizeColumn { column: String, width: f32 },
}

impl TableEvent {
    /// # Errors
    /// Returns `InvalidEvent` if the JSON is not a known event.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RowviewError::InvalidEvent(e.to_string()))
    }

    /// Parse a JSON array of events.
    ///
    /// # Errors
    /// Returns `InvalidEvent` if any entry is not a known event.
    pub fn parse_script(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| RowviewError::InvalidEvent(e.to_string()))
    }
}

impl TableView {
    /// Apply one event completely before returning.
    ///
    /// # Errors
    /// Returns `UnknownColumn` for column events naming a missing column.
    pub fn dispatch(&mut self, event: &TableEvent) -> Result<()> {
        match event {
            TableEvent::Scroll { scroll_top } => {
                self.on_scroll(*scroll_top);
            }
            TableEvent::Filter { text } => {
                self.set_filter(text);
            }
            TableEvent::ColumnFilter { column, text } => {
                self.set_column_filter(column, text);
            }
            TableEvent::Sort { field } => {
                self.toggle_sort(field);
            }
            TableEvent::ClearSort => {
                self.clear_sort();
            }
            TableEvent::ToggleRow { id } => {
                self.toggle_row(*id);
            }
            TableEvent::SelectAllVisible => self.select_all_visible(),
            TableEvent::ClearSelection => self.clear_selection(),
            TableEvent::ToggleColumnVisibility { column } => {
                self.toggle_column_visibility(column)?;
            }
            TableEvent::ToggleColumnFreeze { column } => {
                self.toggle_column_freeze(column)?;
            }
            TableEvent::ResizeColumn { column, width } => {
                self.resize_column(column, *width)?;
            }
        }
        Ok(())
    }

    /// Apply events in order, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first event error.
    pub fn dispatch_all<'a>(&mut self, events: impl IntoIterator<Item = &'a TableEvent>) -> Result<()> {
        for event in events {
            self.dispatch(event)?;
        }
        Ok(())
    }
}
