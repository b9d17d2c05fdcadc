//! Manual drag-and-drop reordering of the underlying row list.
//!
//! Works on the full list, not the visible page, and ignores the active
//! sort and filters entirely.

use crate::part::Part;

/// Move the element at `from` so it lands at index `to`, shifting the rows
/// in between by one.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Move the row `source` into the position held by `target`.
///
/// Returns `false` (and leaves the list untouched) when the ids are equal or
/// either id is absent.
pub fn move_row(parts: &mut Vec<Part>, source: i64, target: i64) -> bool {
    if source == target {
        return false;
    }
    let from = parts.iter().position(|p| p.id == source);
    let to = parts.iter().position(|p| p.id == target);
    let (Some(from), Some(to)) = (from, to) else {
        return false;
    };
    array_move(parts, from, to);
    true
}
