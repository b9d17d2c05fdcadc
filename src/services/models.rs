//! Model training view: per-epoch loss curves and per-architecture cards.

use std::collections::BTreeMap;

use serde::Serialize;

use super::dashboard::Trend;
use super::{MODEL_NAMES, ViewError};
use crate::source::types::{LossHistory, ModelPayload, ModelSummary};

pub type ProductHistories = BTreeMap<String, BTreeMap<String, LossHistory>>;

/// Fold the list of single-product objects into one product map.
/// A later entry for the same product and model replaces the earlier one.
#[must_use]
pub fn merge_metricas(metricas: &[ProductHistories]) -> ProductHistories {
    let mut merged = ProductHistories::new();
    for entry in metricas {
        for (product, models) in entry {
            let slot = merged.entry(product.clone()).or_default();
            for (model, history) in models {
                slot.insert(model.clone(), history.clone());
            }
        }
    }
    merged
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossPoint {
    pub epoch: usize,
    pub train: Option<f64>,
    pub val: Option<f64>,
}

/// One point per epoch, up to the longer of the two series.
#[must_use]
pub fn loss_curve(history: &LossHistory) -> Vec<LossPoint> {
    let len = history.loss.len().max(history.val_loss.len());
    (0..len)
        .map(|i| LossPoint {
            epoch: i + 1,
            train: history.loss.get(i).copied(),
            val: history.val_loss.get(i).copied(),
        })
        .collect()
}

// =============================================================================
// CARDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCard {
    pub model: String,
    pub val_loss: Option<f64>,
    pub eval: String,
    pub trend: Trend,
    /// Footer line shown next to the trend badge.
    pub headline: String,
    /// Muted line under the headline.
    pub description: String,
}

/// Badge direction for an evaluation label.
#[must_use]
pub fn eval_trend(eval: &str) -> Trend {
    match eval {
        "bueno" => Trend::Up,
        "medio" => Trend::Flat,
        _ => Trend::Down,
    }
}

fn model_card(model: &str, summary: &ModelSummary) -> ModelCard {
    ModelCard {
        model: model.to_owned(),
        val_loss: summary.last.and_then(|l| l.val_loss),
        eval: summary.eval.clone(),
        trend: eval_trend(&summary.eval),
        headline: summary.desc_1.clone(),
        description: summary.desc_2.clone(),
    }
}

/// Cards for the known architectures present in `summaries`, in display order.
#[must_use]
pub fn model_cards(summaries: &BTreeMap<String, ModelSummary>) -> Vec<ModelCard> {
    MODEL_NAMES
        .iter()
        .filter_map(|name| summaries.get(*name).map(|s| model_card(name, s)))
        .collect()
}

// =============================================================================
// VIEW
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ModelsView {
    pub product: String,
    pub model: String,
    /// Architectures with a loss history for this product.
    pub models: Vec<String>,
    pub curve: Vec<LossPoint>,
    pub cards: Vec<ModelCard>,
}

/// # Errors
///
/// Returns `UnknownProduct` when the product has neither histories nor a
/// summary, and `UnknownModel` when the product has no history for `model`.
pub fn build_view(payload: &ModelPayload, product: &str, model: &str) -> Result<ModelsView, ViewError> {
    let merged = merge_metricas(&payload.metricas);
    let histories = merged.get(product);
    let summaries = payload.summary.get(product);
    if histories.is_none() && summaries.is_none() {
        return Err(ViewError::UnknownProduct(product.to_owned()));
    }

    let history = histories
        .and_then(|h| h.get(model))
        .ok_or_else(|| ViewError::UnknownModel(model.to_owned()))?;

    Ok(ModelsView {
        product: product.to_owned(),
        model: model.to_owned(),
        models: histories.map(|h| h.keys().cloned().collect()).unwrap_or_default(),
        curve: loss_curve(history),
        cards: summaries.map(model_cards).unwrap_or_default(),
    })
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
