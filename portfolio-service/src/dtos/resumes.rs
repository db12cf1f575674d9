//! Resume payloads.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::UpsertResume;

#[derive(Debug, Deserialize, Validate)]
pub struct ResumePayload {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    pub content: serde_json::Value,
    #[serde(default)]
    pub is_default: bool,
}

impl From<ResumePayload> for UpsertResume {
    fn from(payload: ResumePayload) -> Self {
        UpsertResume {
            id: payload.id,
            title: payload.title,
            content: payload.content,
            is_default: payload.is_default,
        }
    }
}
