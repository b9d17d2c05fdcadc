//! Row selection: an ephemeral set of selected ids kept beside the rows.

use std::collections::HashSet;

use serde::Serialize;

/// Header checkbox state for the rows on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSelection {
    Unchecked,
    Indeterminate,
    Checked,
}

#[derive(Debug, Clone, Default)]
pub struct RowSelection {
    selected: HashSet<i64>,
}

impl RowSelection {
    #[must_use]
    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    /// Set a row's selection, or flip it when `value` is `None`.
    pub fn toggle(&mut self, id: i64, value: Option<bool>) {
        let select = value.unwrap_or(!self.is_selected(id));
        if select {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    pub fn set_all<I>(&mut self, ids: I, value: bool)
    where
        I: IntoIterator<Item = i64>,
    {
        for id in ids {
            self.toggle(id, Some(value));
        }
    }

    /// How many of `ids` are selected.
    #[must_use]
    pub fn count_in<I>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = i64>,
    {
        ids.into_iter().filter(|id| self.is_selected(*id)).count()
    }

    #[must_use]
    pub fn page_state(&self, page_ids: &[i64]) -> PageSelection {
        let selected = self.count_in(page_ids.iter().copied());
        if selected == 0 {
            PageSelection::Unchecked
        } else if selected == page_ids.len() {
            PageSelection::Checked
        } else {
            PageSelection::Indeterminate
        }
    }
}
