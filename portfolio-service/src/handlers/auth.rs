//! Session login/logout for the tools area.

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use tower_sessions::Session;
use tracing::info;

use crate::dtos::auth::LoginRequest;
use crate::middleware::SESSION_USER_KEY;
use crate::utils::{verify_password, Password, PasswordHashString, ValidatedJson};
use crate::AppState;
use service_core::error::AppError;

/// Verify credentials and establish a cookie session. Unknown email and
/// wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .db
        .get_user_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Invalid email or password")))?;

    verify_password(
        &Password::new(payload.password),
        &PasswordHashString::new(user.password_hash.clone()),
    )
    .map_err(|_| AppError::Unauthorized(anyhow::anyhow!("Invalid email or password")))?;

    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Failed to establish session: {}", e))
        })?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(json!({
        "message": "Logged in",
        "user": { "id": user.id, "email": user.email }
    })))
}

/// Drop the session. Safe to call without one.
pub async fn logout(session: Session) -> impl IntoResponse {
    session.clear().await;
    Json(json!({ "message": "Logged out" }))
}
