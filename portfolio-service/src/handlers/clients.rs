//! Client registry endpoints.

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::dtos::clients::ClientPayload;
use crate::handlers::IdQuery;
use crate::middleware::CurrentOwner;
use crate::utils::ValidatedJson;
use crate::AppState;
use service_core::error::AppError;

/// `GET /api/clients` lists; `GET /api/clients?id=` fetches one.
pub async fn get_clients(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    match query.id {
        Some(id) => {
            let client = state
                .db
                .get_client(owner_id, id)
                .await?
                .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Client not found")))?;
            Ok(Json(client).into_response())
        }
        None => {
            let clients = state.db.list_clients(owner_id).await?;
            Ok(Json(clients).into_response())
        }
    }
}

/// Create or update a client; an id matching an owned row makes this an
/// update.
pub async fn upsert_client(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    let client = state.db.upsert_client(owner_id, &payload.into()).await?;
    Ok((StatusCode::OK, Json(client)))
}

/// Delete a client. 409 while documents still reference it.
pub async fn delete_client(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("id is required")))?;

    if state.db.delete_client(owner_id, id).await? {
        Ok(Json(json!({ "deleted": true })))
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Client not found")))
    }
}
