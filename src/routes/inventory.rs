//! Inventory table session routes.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::source_error_to_status;
use crate::services::inventory::{self, InventoryError, TableCommand};
use crate::state::AppState;
use crate::table::TableView;

#[derive(Debug, Default, Deserialize)]
pub struct CreateTableBody {
    /// Applied in order before the first view is returned.
    #[serde(default)]
    pub commands: Vec<TableCommand>,
}

#[derive(Debug, Serialize)]
pub struct TableSessionResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub view: TableView,
}

/// `POST /api/inventory/tables`: open a session. The body is optional.
pub async fn create_table(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TableSessionResponse>), StatusCode> {
    let body: CreateTableBody = if body.iter().all(u8::is_ascii_whitespace) {
        CreateTableBody::default()
    } else {
        serde_json::from_slice(&body).map_err(|_| StatusCode::BAD_REQUEST)?
    };

    let (id, view) = inventory::create_session(&state, body.commands)
        .await
        .map_err(|e| inventory_error_to_status(&e))?;
    Ok((StatusCode::CREATED, Json(TableSessionResponse { id, view })))
}

/// `GET /api/inventory/tables/{id}`: current view.
pub async fn get_table(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TableSessionResponse>, StatusCode> {
    let view = inventory::session_view(&state, id)
        .await
        .map_err(|e| inventory_error_to_status(&e))?;
    Ok(Json(TableSessionResponse { id, view }))
}

/// `POST /api/inventory/tables/{id}/commands`: apply one command.
pub async fn apply_command(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(command): Json<TableCommand>,
) -> Result<Json<TableSessionResponse>, StatusCode> {
    let view = inventory::apply(&state, id, command)
        .await
        .map_err(|e| inventory_error_to_status(&e))?;
    Ok(Json(TableSessionResponse { id, view }))
}

/// `DELETE /api/inventory/tables/{id}`.
pub async fn delete_table(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    inventory::delete_session(&state, id)
        .await
        .map_err(|e| inventory_error_to_status(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn inventory_error_to_status(err: &InventoryError) -> StatusCode {
    match err {
        InventoryError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        InventoryError::Table(_) => StatusCode::BAD_REQUEST,
        InventoryError::Source(e) => source_error_to_status(e),
    }
}

#[cfg(test)]
#[path = "inventory_test.rs"]
mod tests;
