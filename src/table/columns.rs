//! Column definitions and visibility for the parts table.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::TableError;
use crate::part::Part;

/// Every column the parts table renders, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    Drag,
    Select,
    Producto,
    Marca,
    NumeroSerie,
    Ventas1,
    Ventas2,
    Ventas3,
    Inventario,
    Forecasting,
    Status,
    Actions,
}

/// How a column's values compare and which direction a first sort click picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Row widgets (drag handle, checkbox, menu) with no data accessor.
    Widget,
    Text,
    Numeric,
}

impl ColumnId {
    pub const ALL: [Self; 12] = [
        Self::Drag,
        Self::Select,
        Self::Producto,
        Self::Marca,
        Self::NumeroSerie,
        Self::Ventas1,
        Self::Ventas2,
        Self::Ventas3,
        Self::Inventario,
        Self::Forecasting,
        Self::Status,
        Self::Actions,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Select => "select",
            Self::Producto => "producto",
            Self::Marca => "marca",
            Self::NumeroSerie => "numeroSerie",
            Self::Ventas1 => "ventas1",
            Self::Ventas2 => "ventas2",
            Self::Ventas3 => "ventas3",
            Self::Inventario => "inventario",
            Self::Forecasting => "forecasting",
            Self::Status => "status",
            Self::Actions => "actions",
        }
    }

    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Self::Drag | Self::Select | Self::Actions => "",
            Self::Producto => "Producto",
            Self::Marca => "Marca",
            Self::NumeroSerie => "N° de serie",
            Self::Ventas1 => "Ventas Agosto 2025",
            Self::Ventas2 => "Ventas Septiembre 2025",
            Self::Ventas3 => "Ventas Octubre 2025",
            Self::Inventario => "Inventario",
            Self::Forecasting => "Predicción",
            Self::Status => "Status",
        }
    }

    #[must_use]
    pub fn kind(self) -> ColumnKind {
        match self {
            Self::Drag | Self::Select | Self::Actions => ColumnKind::Widget,
            Self::Producto | Self::Marca | Self::NumeroSerie | Self::Status => ColumnKind::Text,
            Self::Ventas1 | Self::Ventas2 | Self::Ventas3 | Self::Inventario | Self::Forecasting => {
                ColumnKind::Numeric
            }
        }
    }

    #[must_use]
    pub fn is_sortable(self) -> bool {
        self.kind() != ColumnKind::Widget
    }

    /// Data columns can be hidden, except the product name which anchors the row.
    #[must_use]
    pub fn is_hideable(self) -> bool {
        self.kind() != ColumnKind::Widget && self != Self::Producto
    }

    /// Cell value for a data column; `Null` for widgets and missing numbers.
    #[must_use]
    pub fn cell(self, part: &Part) -> serde_json::Value {
        use serde_json::Value;
        let count = |v: Option<i64>| v.map_or(Value::Null, Value::from);
        match self {
            Self::Drag | Self::Select | Self::Actions => Value::Null,
            Self::Producto => Value::from(part.producto.as_str()),
            Self::Marca => Value::from(part.marca.as_str()),
            Self::NumeroSerie => Value::from(part.numero_serie.as_str()),
            Self::Ventas1 => count(part.ventas1),
            Self::Ventas2 => count(part.ventas2),
            Self::Ventas3 => count(part.ventas3),
            Self::Inventario => count(part.inventario),
            Self::Forecasting => count(part.forecasting),
            Self::Status => part.status.map_or(Value::Null, |s| Value::from(s.as_str())),
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// VISIBILITY
// =============================================================================

/// Hidden-column set. Every column starts visible.
#[derive(Debug, Clone, Default)]
pub struct ColumnVisibility {
    hidden: HashSet<ColumnId>,
}

impl ColumnVisibility {
    /// Show or hide a column.
    ///
    /// # Errors
    ///
    /// Returns `NotHideable` for widget columns and the product column.
    pub fn set(&mut self, column: ColumnId, visible: bool) -> Result<(), TableError> {
        if !column.is_hideable() {
            return Err(TableError::NotHideable(column));
        }
        if visible {
            self.hidden.remove(&column);
        } else {
            self.hidden.insert(column);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_visible(&self, column: ColumnId) -> bool {
        !self.hidden.contains(&column)
    }

    /// Visible data columns in display order.
    #[must_use]
    pub fn visible_data_columns(&self) -> Vec<ColumnId> {
        ColumnId::ALL
            .into_iter()
            .filter(|c| c.kind() != ColumnKind::Widget && self.is_visible(*c))
            .collect()
    }
}
