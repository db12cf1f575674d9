//! Contact form endpoint.

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::dtos::contact::ContactPayload;
use crate::services::metrics::CONTACT_MESSAGES_TOTAL;
use crate::utils::ValidatedJson;
use crate::AppState;
use service_core::error::AppError;

/// Validate and hand the message to the mailer. A failed send is a 500 the
/// caller must resubmit; nothing is queued or retried.
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    let subject = payload
        .subject
        .unwrap_or_else(|| "New contact message".to_string());

    match state
        .mailer
        .send_contact_message(&payload.name, &payload.email, &subject, &payload.message)
        .await
    {
        Ok(()) => {
            CONTACT_MESSAGES_TOTAL.with_label_values(&["sent"]).inc();
            Ok(Json(json!({ "message": "Message sent" })))
        }
        Err(e) => {
            CONTACT_MESSAGES_TOTAL.with_label_values(&["failed"]).inc();
            Err(e)
        }
    }
}
