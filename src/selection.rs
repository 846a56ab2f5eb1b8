//! Selection ledger: the set of selected row ids.
//!
//! Keyed by [`RowId`], not by logical position, so a selection survives
//! filtering, sorting and scrolling.

use std::collections::HashSet;

use crate::types::{HeaderCheck, RowId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionLedger {
    selected: HashSet<RowId>,
}

impl SelectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns the new state.
    pub fn toggle(&mut self, id: RowId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Toggle-all over the ids the caller passes (the windowed rows).
    ///
    /// If every id is already selected they are all removed; otherwise the
    /// missing ones are added. Ids outside `ids` are left untouched.
    pub fn select_all(&mut self, ids: &[RowId]) {
        if ids.iter().all(|id| self.selected.contains(id)) {
            for id in ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(ids.iter().copied());
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.selected.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Header checkbox state for the given windowed ids.
    pub fn header_state(&self, ids: &[RowId]) -> HeaderCheck {
        let selected = ids.iter().filter(|id| self.selected.contains(id)).count();
        if selected == 0 {
            HeaderCheck::Unchecked
        } else if selected == ids.len() {
            HeaderCheck::Checked
        } else {
            HeaderCheck::Indeterminate
        }
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
    fn test_toggle_twice_restores() {
        let mut ledger = SelectionLedger::new();
        ledger.toggle(4);
        let before = ledger.clone();
        assert!(ledger.toggle(9));
        assert!(!ledger.toggle(9));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_select_all_empty_is_noop() {
        let mut ledger = SelectionLedger::new();
        ledger.toggle(1);
        ledger.select_all(&[]);
        assert_eq!(ledger.selected_ids(), vec![1]);
    }

    #[test]
    fn test_header_state() {
        let mut ledger = SelectionLedger::new();
        assert_eq!(ledger.header_state(&[1, 2]), HeaderCheck::Unchecked);
        ledger.toggle(1);
        assert_eq!(ledger.header_state(&[1, 2]), HeaderCheck::Indeterminate);
        ledger.toggle(2);
        assert_eq!(ledger.header_state(&[1, 2]), HeaderCheck::Checked);
        assert_eq!(ledger.header_state(&[]), HeaderCheck::Unchecked);
    }
}
