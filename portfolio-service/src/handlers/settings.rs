//! Invoice settings endpoints.

use axum::{
    extract::{Extension, State},
    response::IntoResponse,
    Json,
};

use crate::dtos::settings::{SettingsPayload, SettingsView};
use crate::middleware::CurrentOwner;
use crate::models::InvoiceSettings;
use crate::utils::ValidatedJson;
use crate::AppState;
use service_core::error::AppError;

/// Fetch the caller's settings, or the documented defaults when none are
/// stored. Reading never creates a row.
pub async fn get_settings(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state
        .db
        .get_settings(owner_id)
        .await?
        .unwrap_or_else(|| InvoiceSettings::defaulted(owner_id));

    Ok(Json(SettingsView::from(settings)))
}

/// Create or replace the caller's settings.
pub async fn upsert_settings(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<SettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.db.upsert_settings(owner_id, &payload.into()).await?;
    Ok(Json(SettingsView::from(settings)))
}
