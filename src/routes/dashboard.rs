//! Dashboard, model evaluation and forecast routes.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::warn;

use super::source_error_to_status;
use crate::services::dashboard::{self as dashboard_view, DashboardView, TimeRange};
use crate::services::forecast::{self, ForecastView};
use crate::services::models::{self, ModelsView};
use crate::services::{DEFAULT_MODEL, DEFAULT_PRODUCT, ViewError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub product: Option<String>,
    pub model: Option<String>,
}

impl SelectionQuery {
    fn product(&self) -> &str {
        self.product.as_deref().unwrap_or(DEFAULT_PRODUCT)
    }

    fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

/// `GET /api/dashboard?range=90d|30d|7d`: quarter cards and ranged sales.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<DashboardView>, StatusCode> {
    let range = match query.range.as_deref() {
        Some(raw) => TimeRange::parse(raw).map_err(|e| view_error_to_status(&e))?,
        None => TimeRange::default(),
    };
    let payload = state.source.dashboard().await.map_err(|e| fetch_failed(&state, "dashboard", &e))?;
    Ok(Json(dashboard_view::build_view(&payload, range)))
}

/// `GET /api/models?product=P001&model=MLP`: loss curve and model cards.
pub async fn models(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<ModelsView>, StatusCode> {
    let payload = state.source.build_models().await.map_err(|e| fetch_failed(&state, "models", &e))?;
    let view = models::build_view(&payload, query.product(), query.model()).map_err(|e| view_error_to_status(&e))?;
    Ok(Json(view))
}

/// `GET /api/predict?product=P001&model=MLP`: forecast series and cards.
pub async fn predict(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<ForecastView>, StatusCode> {
    let payload = state.source.predict().await.map_err(|e| fetch_failed(&state, "predict", &e))?;
    let view = forecast::build_view(&payload, query.product(), query.model()).map_err(|e| view_error_to_status(&e))?;
    Ok(Json(view))
}

fn fetch_failed(state: &AppState, document: &str, err: &crate::source::SourceError) -> StatusCode {
    warn!(source = state.source.name(), document, error = %err, "source fetch failed");
    source_error_to_status(err)
}

pub(crate) fn view_error_to_status(err: &ViewError) -> StatusCode {
    match err {
        ViewError::UnknownProduct(_) | ViewError::UnknownModel(_) => StatusCode::NOT_FOUND,
        ViewError::UnknownRange(_) => StatusCode::BAD_REQUEST,
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
