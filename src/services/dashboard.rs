//! Sales dashboard view: quarter cards plus the ranged sales chart.

use serde::{Deserialize, Serialize};
use time::macros::{date, format_description};
use time::{Date, Duration};
use tracing::debug;

use super::ViewError;
use crate::source::types::{DashboardPayload, SalesPoint};

/// The demo series ends here; chart ranges count back from it.
pub const REFERENCE_DATE: Date = date!(2025 - 03 - 31);

// =============================================================================
// TIME RANGE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "90d")]
    Days90,
    #[serde(rename = "30d")]
    Days30,
    #[serde(rename = "7d")]
    Days7,
}

impl TimeRange {
    /// # Errors
    ///
    /// Returns `UnknownRange` for anything but `90d`, `30d` or `7d`.
    pub fn parse(raw: &str) -> Result<Self, ViewError> {
        match raw {
            "90d" => Ok(Self::Days90),
            "30d" => Ok(Self::Days30),
            "7d" => Ok(Self::Days7),
            other => Err(ViewError::UnknownRange(other.to_owned())),
        }
    }

    #[must_use]
    pub fn days(self) -> i64 {
        match self {
            Self::Days90 => 90,
            Self::Days30 => 30,
            Self::Days7 => 7,
        }
    }

    /// First date kept by this range.
    #[must_use]
    pub fn start_date(self) -> Date {
        REFERENCE_DATE - Duration::days(self.days())
    }
}

/// Points on or after the range start. Points with unparseable dates are dropped.
#[must_use]
pub fn filter_sales(sales: &[SalesPoint], range: TimeRange) -> Vec<SalesPoint> {
    let start = range.start_date();
    let format = format_description!("[year]-[month]-[day]");
    sales
        .iter()
        .filter(|point| match Date::parse(&point.date, format) {
            Ok(day) => day >= start,
            Err(_) => {
                debug!(date = %point.date, "dropping sales point with bad date");
                false
            }
        })
        .cloned()
        .collect()
}

// =============================================================================
// SECTION CARDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    #[must_use]
    pub fn classify(rate: Option<f64>) -> Self {
        match rate {
            Some(r) if r > 0.0 => Self::Up,
            Some(r) if r < 0.0 => Self::Down,
            _ => Self::Flat,
        }
    }
}

/// Numeric value of a formatted rate such as `"$-3.20"`.
///
/// Everything but digits, `.` and `-` is stripped first. An empty remainder
/// reads as zero; a remainder that is still not a number is `None`.
#[must_use]
pub fn parse_rate(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-').collect();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse::<f64>().ok()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionCard {
    pub description: &'static str,
    pub value: String,
    pub rate: String,
    pub trend: Trend,
    pub footer: String,
    pub range: String,
}

fn card(description: &'static str, subject: &str, value: &str, rate: &str, range: &str) -> SectionCard {
    let trend = Trend::classify(parse_rate(rate));
    let change = match trend {
        Trend::Up => "subieron este período",
        Trend::Down => "disminuyeron este período",
        Trend::Flat => "sin cambios",
    };
    SectionCard {
        description,
        value: value.to_owned(),
        rate: rate.to_owned(),
        trend,
        footer: format!("{subject} {change}"),
        range: range.to_owned(),
    }
}

/// The four quarter cards. Each card's trend comes from its own rate.
#[must_use]
pub fn section_cards(payload: &DashboardPayload) -> Vec<SectionCard> {
    vec![
        card(
            "Ventas totales del trimestre actual",
            "Ventas",
            &payload.current_quarter_total_sales,
            &payload.current_quarter_sale_rate,
            &payload.current_quarter_range,
        ),
        card(
            "Facturas totales del trimestre actual",
            "No. facturas",
            &payload.current_quarter_total_invoices,
            &payload.current_quarter_invoice_rate,
            &payload.current_quarter_range,
        ),
        card(
            "Ventas totales del trimestre anterior",
            "Ventas",
            &payload.last_quarter_total_sales,
            &payload.last_quarter_sale_rate,
            &payload.last_quarter_range,
        ),
        card(
            "Facturas totales del trimestre pasado",
            "No. facturas",
            &payload.last_quarter_total_invoices,
            &payload.last_quarter_invoice_rate,
            &payload.last_quarter_range,
        ),
    ]
}

// =============================================================================
// VIEW
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub cards: Vec<SectionCard>,
    pub range: TimeRange,
    pub sales: Vec<SalesPoint>,
}

#[must_use]
pub fn build_view(payload: &DashboardPayload, range: TimeRange) -> DashboardView {
    DashboardView { cards: section_cards(payload), range, sales: filter_sales(&payload.sales, range) }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
