//! Time entry model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One logged unit of work, optionally attached to a client and optionally
/// billable at a rate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimeEntry {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub client_id: Option<Uuid>,
    pub description: String,
    pub entry_date: NaiveDate,
    pub hours: Decimal,
    pub rate: Option<Decimal>,
    pub billable: bool,
    pub invoiced: bool,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating or updating a time entry.
#[derive(Debug, Clone)]
pub struct UpsertTimeEntry {
    pub id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub description: String,
    pub entry_date: NaiveDate,
    pub hours: Decimal,
    pub rate: Option<Decimal>,
    pub billable: bool,
    pub invoiced: bool,
}
