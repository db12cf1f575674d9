//! Session-based auth for the owner-facing API.

use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;
use tower_sessions::Session;
use uuid::Uuid;

/// Session key holding the authenticated user id.
pub const SESSION_USER_KEY: &str = "user_id";

/// The authenticated owner, resolved from the session cookie and threaded
/// into handlers as a request extension. Every data-access call takes this
/// id explicitly; there is no ambient current user.
#[derive(Debug, Clone, Copy)]
pub struct CurrentOwner(pub Uuid);

/// Reject requests without a live session; otherwise stamp the owner id
/// onto the request for extraction.
pub async fn session_auth_middleware(
    session: Session,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user_id: Option<Uuid> = session.get(SESSION_USER_KEY).await.unwrap_or(None);

    match user_id {
        Some(user_id) => {
            request.extensions_mut().insert(CurrentOwner(user_id));
            Ok(next.run(request).await)
        }
        None => Err(AppError::Unauthorized(anyhow::anyhow!(
            "Authentication required"
        ))),
    }
}
