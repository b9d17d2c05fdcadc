//! Data sources: where dashboard, model, forecast and inventory documents come from.
//!
//! DESIGN
//! ======
//! Handlers only see `Arc<dyn DataSource>`. `LiveSource` fetches from the
//! analytics backend over HTTP; `FixtureSource` serves the bundled demo
//! documents after an artificial delay so the UI loading states stay
//! exercised. The backend has no inventory endpoint, so both sources read
//! inventory rows from the bundled fixture.
//!
//! Fetches are single awaited requests: no retry, no caching.

pub mod fixture;
pub mod live;
pub mod types;

use std::sync::Arc;

use serde_json::Value;

use crate::config::{AppConfig, SourceKind};
pub use fixture::FixtureSource;
pub use live::LiveSource;
use types::{DashboardPayload, ModelPayload, PredictPayload};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No base URL configured for the live backend.
    #[error("live backend base URL is not configured (set PARTSDASH_API_BASE)")]
    MissingBaseUrl,

    /// The backend answered with a non-success status.
    #[error("fetch failed: status {status}")]
    FetchFailed { status: u16 },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The body was not the expected document.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Backend documents behind the dashboard pages.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    async fn dashboard(&self) -> Result<DashboardPayload, SourceError>;

    async fn build_models(&self) -> Result<ModelPayload, SourceError>;

    async fn predict(&self) -> Result<PredictPayload, SourceError>;

    /// Raw inventory rows, before normalization.
    async fn inventory(&self) -> Result<Vec<Value>, SourceError>;
}

/// Build the source selected by `PARTSDASH_SOURCE`.
///
/// # Errors
///
/// Returns `HttpClientBuild` if the live HTTP client cannot be constructed.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn DataSource>, SourceError> {
    let source: Arc<dyn DataSource> = match config.source {
        SourceKind::Fixture => Arc::new(FixtureSource::new(config.fixture_delay)),
        SourceKind::Live => Arc::new(LiveSource::new(config.api_base.clone(), config.timeouts)?),
    };
    Ok(source)
}

/// Decode a JSON body into `T`.
pub(crate) fn parse_payload<T>(text: &str) -> Result<T, SourceError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(text).map_err(|e| SourceError::Decode(e.to_string()))
}
