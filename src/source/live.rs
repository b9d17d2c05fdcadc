//! Analytics backend client.
//!
//! Thin HTTP wrapper over the three GET endpoints. Body decoding goes
//! through `parse_payload` so it can be tested without a server.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{DashboardPayload, ModelPayload, PredictPayload};
use super::{DataSource, SourceError, fixture, parse_payload};
use crate::config::RequestTimeouts;

pub const DASHBOARD_PATH: &str = "/sales/dashboard";
pub const BUILD_MODELS_PATH: &str = "/models/build";
pub const PREDICT_PATH: &str = "/models/predict";

pub struct LiveSource {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl LiveSource {
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the reqwest client cannot be constructed.
    pub fn new(base_url: Option<String>, timeouts: RequestTimeouts) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .build()
            .map_err(|e| SourceError::HttpClientBuild(e.to_string()))?;
        let base_url = base_url.map(|b| b.trim_end_matches('/').to_string());
        Ok(Self { http, base_url })
    }

    /// Full URL for `path`, or `MissingBaseUrl` when no backend is configured.
    pub(crate) fn endpoint(&self, path: &str) -> Result<String, SourceError> {
        let base = self.base_url.as_deref().ok_or(SourceError::MissingBaseUrl)?;
        Ok(format!("{base}{path}"))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = self.endpoint(path)?;
        debug!(%url, "live fetch");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "live fetch request failed");
                SourceError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "live fetch failed");
            return Err(SourceError::FetchFailed { status: status.as_u16() });
        }

        let text = response
            .text()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;
        parse_payload(&text)
    }
}

#[async_trait::async_trait]
impl DataSource for LiveSource {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn dashboard(&self) -> Result<DashboardPayload, SourceError> {
        self.get_json(DASHBOARD_PATH).await
    }

    async fn build_models(&self) -> Result<ModelPayload, SourceError> {
        self.get_json(BUILD_MODELS_PATH).await
    }

    async fn predict(&self) -> Result<PredictPayload, SourceError> {
        self.get_json(PREDICT_PATH).await
    }

    async fn inventory(&self) -> Result<Vec<Value>, SourceError> {
        fixture::inventory_rows()
    }
}

#[cfg(test)]
#[path = "live_test.rs"]
mod tests;
