//! Wire shapes of the analytics backend documents.
//!
//! Every field carries a serde default so partial documents still decode;
//! the view layer decides what a missing value means.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// DASHBOARD
// =============================================================================

/// `/sales/dashboard`: pre-formatted quarter strings plus the daily series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardPayload {
    pub current_quarter_range: String,
    pub current_quarter_total_sales: String,
    pub current_quarter_sale_rate: String,
    pub current_quarter_total_invoices: String,
    pub current_quarter_invoice_rate: String,
    pub last_quarter_range: String,
    pub last_quarter_total_sales: String,
    pub last_quarter_sale_rate: String,
    // The backend has emitted both spellings.
    #[serde(alias = "last_quarter_total_invoice")]
    pub last_quarter_total_invoices: String,
    pub last_quarter_invoice_rate: String,
    pub sales: Vec<SalesPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesPoint {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub current_year: i64,
    pub last_year: i64,
}

// =============================================================================
// MODEL TRAINING
// =============================================================================

/// `/models/build`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPayload {
    /// One single-key object per product: `{product: {model: history}}`.
    pub metricas: Vec<BTreeMap<String, BTreeMap<String, LossHistory>>>,
    /// `{product: {model: summary}}`.
    pub summary: BTreeMap<String, BTreeMap<String, ModelSummary>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossHistory {
    pub loss: Vec<f64>,
    pub val_loss: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSummary {
    pub last: Option<LastLoss>,
    pub desc_1: String,
    pub desc_2: String,
    pub eval: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastLoss {
    pub loss: Option<f64>,
    pub val_loss: Option<f64>,
}

// =============================================================================
// FORECAST
// =============================================================================

/// `/models/predict`: one entry per product.
pub type PredictPayload = Vec<ProductForecast>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForecast {
    pub product_code: String,
    pub models: BTreeMap<String, ModelForecast>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelForecast {
    pub history: History,
    pub forecast: Forecast,
    pub summary: ForecastSummary,
    /// Validation metrics (`mae`, `mape_pct`, `eval`, ...). Passed through untyped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    pub dates: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub dates: Vec<String>,
    pub pred: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSummary {
    pub total_pred: f64,
    pub total_low: f64,
    pub total_up: f64,
    pub mean_daily: f64,
    pub median: f64,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
