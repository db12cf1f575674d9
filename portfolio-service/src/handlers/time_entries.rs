//! Time entry endpoints.

use axum::{
    extract::{Extension, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::dtos::time_entries::{TimeEntryPayload, TimeEntryView};
use crate::handlers::IdQuery;
use crate::middleware::CurrentOwner;
use crate::utils::ValidatedJson;
use crate::AppState;
use service_core::error::AppError;

/// `GET /api/time-entries` lists; `GET /api/time-entries?id=` fetches one.
pub async fn get_time_entries(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    match query.id {
        Some(id) => {
            let entry = state
                .db
                .get_time_entry(owner_id, id)
                .await?
                .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Time entry not found")))?;
            Ok(Json(TimeEntryView::from(entry)).into_response())
        }
        None => {
            let entries = state.db.list_time_entries(owner_id).await?;
            let views: Vec<TimeEntryView> = entries.into_iter().map(TimeEntryView::from).collect();
            Ok(Json(views).into_response())
        }
    }
}

/// Create or update a time entry. An optional client reference must belong
/// to the caller.
pub async fn upsert_time_entry(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<TimeEntryPayload>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(client_id) = payload.client_id {
        if state.db.get_client(owner_id, client_id).await?.is_none() {
            return Err(AppError::BadRequest(anyhow::anyhow!("Unknown client")));
        }
    }

    let entry = state.db.upsert_time_entry(owner_id, &payload.into()).await?;
    Ok(Json(TimeEntryView::from(entry)))
}

/// Delete a time entry.
pub async fn delete_time_entry(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("id is required")))?;

    if state.db.delete_time_entry(owner_id, id).await? {
        Ok(Json(json!({ "deleted": true })))
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Time entry not found")))
    }
}
