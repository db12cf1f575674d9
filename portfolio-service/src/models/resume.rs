//! Resume model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A resume document. Sections (experience, education, skills) live in one
/// JSONB blob; the builder UI owns their internal shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: serde_json::Value,
    pub is_default: bool,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Input for creating or updating a resume.
#[derive(Debug, Clone)]
pub struct UpsertResume {
    pub id: Option<Uuid>,
    pub title: String,
    pub content: serde_json::Value,
    pub is_default: bool,
}
