//! Column filters: product and serial-number search plus a status select.
//!
//! Active filters combine with AND. An empty value removes the filter, so a
//! blank search box never hides rows.

use serde::{Deserialize, Serialize};

use super::TableError;
use super::columns::ColumnId;
use crate::part::{Part, Status};

/// Select value that means "no status filter".
pub const STATUS_ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_serie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl ColumnFilters {
    /// Set or clear the filter for one column.
    ///
    /// # Errors
    ///
    /// Returns `NotFilterable` for columns without a filter control and
    /// `UnknownStatus` for a status value outside the three labels.
    pub fn set(&mut self, column: ColumnId, value: Option<&str>) -> Result<(), TableError> {
        let value = value.filter(|v| !v.is_empty());
        match column {
            ColumnId::Producto => self.producto = value.map(str::to_owned),
            ColumnId::NumeroSerie => self.numero_serie = value.map(str::to_owned),
            ColumnId::Status => {
                self.status = match value {
                    None | Some(STATUS_ALL) => None,
                    Some(raw) => Some(Status::parse(raw).ok_or_else(|| TableError::UnknownStatus(raw.to_owned()))?),
                };
            }
            other => return Err(TableError::NotFilterable(other)),
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn matches(&self, part: &Part) -> bool {
        self.producto.as_deref().is_none_or(|needle| includes_ignore_case(&part.producto, needle))
            && self
                .numero_serie
                .as_deref()
                .is_none_or(|needle| includes_ignore_case(&part.numero_serie, needle))
            && self.status.is_none_or(|status| part.status == Some(status))
    }
}

fn includes_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Distinct statuses present in `parts`, in the fixed Ok / Riesgo / Revisar order.
#[must_use]
pub fn status_options(parts: &[Part]) -> Vec<Status> {
    Status::ALL
        .into_iter()
        .filter(|status| parts.iter().any(|p| p.status == Some(*status)))
        .collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
