//! Bundled demo documents.

use std::time::Duration;

use serde_json::Value;

use super::types::{DashboardPayload, ModelPayload, PredictPayload};
use super::{DataSource, SourceError, parse_payload};

const DASHBOARD_JSON: &str = include_str!("../../fixtures/dashboard.json");
const BUILD_MODEL_JSON: &str = include_str!("../../fixtures/build_model.json");
const PREDICT_JSON: &str = include_str!("../../fixtures/predict.json");
const INVENTORY_JSON: &str = include_str!("../../fixtures/inventory.json");

pub struct FixtureSource {
    delay: Duration,
}

impl FixtureSource {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Inventory rows from the bundled fixture.
///
/// # Errors
///
/// Returns `Decode` if the bundled document is not a JSON array.
pub fn inventory_rows() -> Result<Vec<Value>, SourceError> {
    parse_payload(INVENTORY_JSON)
}

#[async_trait::async_trait]
impl DataSource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn dashboard(&self) -> Result<DashboardPayload, SourceError> {
        self.pause().await;
        parse_payload(DASHBOARD_JSON)
    }

    async fn build_models(&self) -> Result<ModelPayload, SourceError> {
        self.pause().await;
        parse_payload(BUILD_MODEL_JSON)
    }

    async fn predict(&self) -> Result<PredictPayload, SourceError> {
        self.pause().await;
        parse_payload(PREDICT_JSON)
    }

    async fn inventory(&self) -> Result<Vec<Value>, SourceError> {
        self.pause().await;
        inventory_rows()
    }
}

#[cfg(test)]
#[path = "fixture_test.rs"]
mod tests;
