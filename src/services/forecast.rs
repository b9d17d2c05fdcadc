//! Forecast view: history followed by the predicted series with its band.
//!
//! The band is drawn as a stacked area, so each forecast point carries the
//! lower bound (`ci_base`) and the band height (`ci_range`) instead of the
//! upper bound alone.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{MODEL_NAMES, ViewError};
use crate::source::types::{ModelForecast, PredictPayload};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: String,
    pub hist: Option<f64>,
    pub pred: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub ci_base: f64,
    pub ci_range: f64,
}

/// History points, then forecast points. Missing values read as zero except
/// the band bounds, which stay `None` and collapse the band.
#[must_use]
pub fn forecast_series(model: &ModelForecast) -> Vec<ForecastPoint> {
    let history = model.history.dates.iter().enumerate().map(|(i, date)| ForecastPoint {
        date: date.clone(),
        hist: Some(model.history.values.get(i).copied().unwrap_or(0.0)),
        pred: None,
        lower: None,
        upper: None,
        ci_base: 0.0,
        ci_range: 0.0,
    });

    let forecast = &model.forecast;
    let predicted = forecast.dates.iter().enumerate().map(|(i, date)| {
        let lower = forecast.lower.get(i).copied();
        let upper = forecast.upper.get(i).copied();
        let ci_range = match (lower, upper) {
            (Some(l), Some(u)) => (u - l).max(0.0),
            _ => 0.0,
        };
        ForecastPoint {
            date: date.clone(),
            hist: None,
            pred: Some(forecast.pred.get(i).copied().unwrap_or(0.0)),
            lower,
            upper,
            ci_base: lower.unwrap_or(0.0),
            ci_range,
        }
    });

    history.chain(predicted).collect()
}

// =============================================================================
// CARDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastCard {
    pub model: String,
    pub description: String,
    pub total: String,
    pub footer: String,
}

fn forecast_card(name: &str, model: &ModelForecast) -> ForecastCard {
    ForecastCard {
        model: name.to_owned(),
        description: format!("Predicción con {name}"),
        total: format!("{:.0} unidades", model.summary.total_pred),
        footer: format!("La demanda diaria es de {:.2} unidades", model.summary.mean_daily),
    }
}

#[must_use]
pub fn forecast_cards(models: &BTreeMap<String, ModelForecast>) -> Vec<ForecastCard> {
    MODEL_NAMES
        .iter()
        .filter_map(|name| models.get(*name).map(|m| forecast_card(name, m)))
        .collect()
}

// =============================================================================
// VIEW
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ForecastView {
    pub product: String,
    pub model: String,
    pub models: Vec<String>,
    pub points: Vec<ForecastPoint>,
    pub cards: Vec<ForecastCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, serde_json::Value>>,
}

/// # Errors
///
/// Returns `UnknownProduct` or `UnknownModel` when the selection is absent
/// from the payload.
pub fn build_view(payload: &PredictPayload, product: &str, model: &str) -> Result<ForecastView, ViewError> {
    let entry = payload
        .iter()
        .find(|p| p.product_code == product)
        .ok_or_else(|| ViewError::UnknownProduct(product.to_owned()))?;
    let selected = entry
        .models
        .get(model)
        .ok_or_else(|| ViewError::UnknownModel(model.to_owned()))?;

    Ok(ForecastView {
        product: product.to_owned(),
        model: model.to_owned(),
        models: entry.models.keys().cloned().collect(),
        points: forecast_series(selected),
        cards: forecast_cards(&entry.models),
        metrics: selected.metrics.clone(),
    })
}

#[cfg(test)]
#[path = "forecast_test.rs"]
mod tests;
