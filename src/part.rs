//! Part records: the normalized inventory row behind the parts table.
//!
//! DESIGN
//! ======
//! Upstream rows arrive as loose JSON objects keyed by human labels
//! (`"Numero de serie"`, `"Ventas_1"`, ...). `normalize` maps them onto
//! `Part` using JavaScript-style numeric coercion. Nothing is validated:
//! numbers that do not coerce become `None` (serialized as `null`), missing
//! text becomes an empty string, and an unknown status becomes `None`.
//!
//! The one exception is `id`. Selection and drag reordering address rows by
//! id, so a row whose id does not coerce is skipped with a warning, as is
//! any row repeating an id already loaded.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

const KEY_ID: &str = "id";
const KEY_PRODUCTO: &str = "Producto";
const KEY_MARCA: &str = "Marca";
const KEY_NUMERO_SERIE: &str = "Numero de serie";
const KEY_VENTAS_1: &str = "Ventas_1";
const KEY_VENTAS_2: &str = "Ventas_2";
const KEY_VENTAS_3: &str = "Ventas_3";
const KEY_INVENTARIO: &str = "Inventario";
const KEY_FORECASTING: &str = "Forecasting";
const KEY_STATUS: &str = "Status";

// =============================================================================
// STATUS
// =============================================================================

/// Risk classification supplied by the upstream data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Ok,
    Riesgo,
    Revisar,
}

impl Status {
    /// Display priority used for faceted filter options.
    pub const ALL: [Self; 3] = [Self::Ok, Self::Riesgo, Self::Revisar];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "Ok",
            Self::Riesgo => "Riesgo",
            Self::Revisar => "Revisar",
        }
    }

    /// Exact, case-sensitive match against the three upstream labels.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Ok" => Some(Self::Ok),
            "Riesgo" => Some(Self::Riesgo),
            "Revisar" => Some(Self::Revisar),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PART
// =============================================================================

/// Normalized inventory/sales record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: i64,
    pub producto: String,
    pub marca: String,
    pub numero_serie: String,
    pub ventas1: Option<i64>,
    pub ventas2: Option<i64>,
    pub ventas3: Option<i64>,
    pub inventario: Option<i64>,
    pub forecasting: Option<i64>,
    pub status: Option<Status>,
}

/// Normalize one upstream row. Returns `None` when the row has no usable id.
#[must_use]
pub fn normalize(row: &Value) -> Option<Part> {
    let id = coerce_int(row.get(KEY_ID))?;

    Some(Part {
        id,
        producto: text_field(row.get(KEY_PRODUCTO)),
        marca: text_field(row.get(KEY_MARCA)),
        numero_serie: text_field(row.get(KEY_NUMERO_SERIE)),
        ventas1: coerce_int(row.get(KEY_VENTAS_1)),
        ventas2: coerce_int(row.get(KEY_VENTAS_2)),
        ventas3: coerce_int(row.get(KEY_VENTAS_3)),
        inventario: coerce_int(row.get(KEY_INVENTARIO)),
        forecasting: coerce_int(row.get(KEY_FORECASTING)),
        status: row.get(KEY_STATUS).and_then(Value::as_str).and_then(Status::parse),
    })
}

/// Normalize a batch of upstream rows, skipping rows without a usable id.
/// A repeated id keeps its first row; later copies are skipped.
#[must_use]
pub fn load_parts(raw: &[Value]) -> Vec<Part> {
    let mut parts = Vec::with_capacity(raw.len());
    let mut seen = HashSet::with_capacity(raw.len());
    for (index, row) in raw.iter().enumerate() {
        match normalize(row) {
            Some(part) if !seen.insert(part.id) => warn!(index, id = part.id, "skipping duplicate part id"),
            Some(part) => parts.push(part),
            None => warn!(index, "skipping part row without a numeric id"),
        }
    }
    parts
}

// =============================================================================
// COERCION
// =============================================================================

/// `Number(value)` semantics: missing, arrays, objects and unparseable
/// strings are not-a-number; null, false and blank strings are zero.
#[must_use]
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_int(value: Option<&Value>) -> Option<i64> {
    coerce_number(value).map(|n| n.trunc() as i64)
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
#[path = "part_test.rs"]
mod tests;
