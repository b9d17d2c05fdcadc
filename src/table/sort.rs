//! Multi-key column sorting.
//!
//! Keys apply in priority order; the first key is primary. Sorting is
//! stable, so rows that compare equal keep their underlying order (which is
//! where a manual drag shows through an active sort).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::TableError;
use super::columns::{ColumnId, ColumnKind};
use crate::part::Part;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: ColumnId,
    #[serde(default)]
    pub desc: bool,
}

#[cfg(test)]
impl SortKey {
    pub fn asc(column: ColumnId) -> Self {
        Self { column, desc: false }
    }

    pub fn desc(column: ColumnId) -> Self {
        Self { column, desc: true }
    }
}

/// Check that every key targets a sortable column, dropping repeated columns
/// (the first occurrence wins).
///
/// # Errors
///
/// Returns `NotSortable` for widget columns.
pub fn normalize_sorting(sorting: Vec<SortKey>) -> Result<Vec<SortKey>, TableError> {
    let mut out: Vec<SortKey> = Vec::with_capacity(sorting.len());
    for key in sorting {
        if !key.column.is_sortable() {
            return Err(TableError::NotSortable(key.column));
        }
        if !out.iter().any(|k| k.column == key.column) {
            out.push(key);
        }
    }
    Ok(out)
}

/// Header-click toggle: none → first direction → opposite → none.
///
/// Numeric columns start descending, text columns ascending. A `multi`
/// toggle edits the clicked key in place (or appends it); otherwise the
/// clicked column replaces all keys.
///
/// # Errors
///
/// Returns `NotSortable` for widget columns.
pub fn toggle_sorting(sorting: &mut Vec<SortKey>, column: ColumnId, multi: bool) -> Result<(), TableError> {
    if !column.is_sortable() {
        return Err(TableError::NotSortable(column));
    }
    let first_desc = column.kind() == ColumnKind::Numeric;
    let current = sorting.iter().position(|k| k.column == column);

    // `None` means the key is removed.
    let next = match current.map(|i| sorting[i].desc) {
        None => Some(first_desc),
        Some(desc) if desc == first_desc => Some(!desc),
        Some(_) => None,
    };

    if multi {
        match (current, next) {
            (Some(i), Some(desc)) => sorting[i].desc = desc,
            (Some(i), None) => {
                sorting.remove(i);
            }
            (None, Some(desc)) => sorting.push(SortKey { column, desc }),
            (None, None) => {}
        }
    } else {
        sorting.clear();
        if let Some(desc) = next {
            sorting.push(SortKey { column, desc });
        }
    }
    Ok(())
}

/// Stable sort of `rows` by `sorting`.
pub fn sort_rows(rows: &mut [&Part], sorting: &[SortKey]) {
    if sorting.is_empty() {
        return;
    }
    rows.sort_by(|a, b| compare_parts(a, b, sorting));
}

fn compare_parts(a: &Part, b: &Part, sorting: &[SortKey]) -> Ordering {
    for key in sorting {
        let ord = compare_column(a, b, key.column);
        let ord = if key.desc { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn compare_column(a: &Part, b: &Part, column: ColumnId) -> Ordering {
    match column {
        ColumnId::Producto => compare_alphanumeric(&a.producto, &b.producto),
        ColumnId::Marca => compare_alphanumeric(&a.marca, &b.marca),
        ColumnId::NumeroSerie => compare_alphanumeric(&a.numero_serie, &b.numero_serie),
        ColumnId::Status => compare_alphanumeric(
            a.status.map_or("", |s| s.as_str()),
            b.status.map_or("", |s| s.as_str()),
        ),
        // Missing numbers sort before every value.
        ColumnId::Ventas1 => a.ventas1.cmp(&b.ventas1),
        ColumnId::Ventas2 => a.ventas2.cmp(&b.ventas2),
        ColumnId::Ventas3 => a.ventas3.cmp(&b.ventas3),
        ColumnId::Inventario => a.inventario.cmp(&b.inventario),
        ColumnId::Forecasting => a.forecasting.cmp(&b.forecasting),
        ColumnId::Drag | ColumnId::Select | ColumnId::Actions => Ordering::Equal,
    }
}

/// Case-insensitive natural order: digit runs compare by value, so
/// `"Filter 9"` sorts before `"Filter 10"`.
#[must_use]
pub fn compare_alphanumeric(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let mut left = chunks(&a);
    let mut right = chunks(&b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_chunk(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_chunk(x: &str, y: &str) -> Ordering {
    let x_digits = x.starts_with(|c: char| c.is_ascii_digit());
    let y_digits = y.starts_with(|c: char| c.is_ascii_digit());
    match (x_digits, y_digits) {
        (true, true) => {
            let xt = x.trim_start_matches('0');
            let yt = y.trim_start_matches('0');
            xt.len().cmp(&yt.len()).then_with(|| xt.cmp(yt))
        }
        // Numbers sort ahead of text at the same position.
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.cmp(y),
    }
}

/// Split into alternating runs of ASCII digits and everything else.
fn chunks(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(rest.len(), |(i, _)| i);
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}

#[cfg(test)]
#[path = "sort_test.rs"]
mod tests;
