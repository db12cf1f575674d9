//! Maintenance endpoints.

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

use crate::AppState;
use service_core::error::AppError;

/// Assign share tokens to legacy rows that predate token issuance. Safe to
/// rerun; already-tokened rows are never rewritten.
pub async fn backfill_tokens(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let report = state.db.backfill_tokens().await?;
    info!(updated = report.total(), "Token backfill requested");
    Ok(Json(report))
}
