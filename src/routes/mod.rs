//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API consumed by the dashboard pages and the
//! CLI. Every route shares one `AppState`; CORS is open to any origin and
//! responses are gzip-compressed.

pub mod chat;
pub mod dashboard;
pub mod inventory;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::source::SourceError;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/dashboard", get(dashboard::dashboard))
        .route("/api/models", get(dashboard::models))
        .route("/api/predict", get(dashboard::predict))
        .route("/api/inventory/tables", post(inventory::create_table))
        .route(
            "/api/inventory/tables/{id}",
            get(inventory::get_table).delete(inventory::delete_table),
        )
        .route("/api/inventory/tables/{id}/commands", post(inventory::apply_command))
        .route("/api/chat", get(chat::overview).post(chat::send))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub(crate) fn source_error_to_status(err: &SourceError) -> StatusCode {
    match err {
        SourceError::MissingBaseUrl | SourceError::HttpClientBuild(_) => StatusCode::SERVICE_UNAVAILABLE,
        SourceError::FetchFailed { .. } | SourceError::Request(_) | SourceError::Decode(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn healthz_is_ok() {
        assert_eq!(healthz().await, StatusCode::OK);
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        assert_eq!(source_error_to_status(&SourceError::FetchFailed { status: 500 }), StatusCode::BAD_GATEWAY);
        assert_eq!(source_error_to_status(&SourceError::Decode("eof".into())), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn missing_backend_is_unavailable() {
        assert_eq!(source_error_to_status(&SourceError::MissingBaseUrl), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn router_builds() {
        let _router = app(crate::state::test_helpers::test_app_state());
    }
}
