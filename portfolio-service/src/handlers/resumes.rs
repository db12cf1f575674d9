//! Resume endpoints.

use axum::{
    extract::{Extension, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::dtos::resumes::ResumePayload;
use crate::handlers::IdQuery;
use crate::middleware::CurrentOwner;
use crate::utils::ValidatedJson;
use crate::AppState;
use service_core::error::AppError;

/// `GET /api/resumes` lists; `GET /api/resumes?id=` fetches one.
pub async fn get_resumes(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    match query.id {
        Some(id) => {
            let resume = state
                .db
                .get_resume(owner_id, id)
                .await?
                .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Resume not found")))?;
            Ok(Json(resume).into_response())
        }
        None => {
            let resumes = state.db.list_resumes(owner_id).await?;
            Ok(Json(resumes).into_response())
        }
    }
}

/// Create or update a resume.
pub async fn upsert_resume(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<ResumePayload>,
) -> Result<impl IntoResponse, AppError> {
    let resume = state.db.upsert_resume(owner_id, &payload.into()).await?;
    Ok(Json(resume))
}

/// Delete a resume.
pub async fn delete_resume(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("id is required")))?;

    if state.db.delete_resume(owner_id, id).await? {
        Ok(Json(json!({ "deleted": true })))
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Resume not found")))
    }
}
