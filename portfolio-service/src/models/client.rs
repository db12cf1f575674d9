//! Client registry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer record referenced by every billing document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub tax_id: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating or updating a client. A present `id` that matches an
/// owned row makes this an update; otherwise a new row is created.
#[derive(Debug, Clone)]
pub struct UpsertClient {
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub tax_id: Option<String>,
}
