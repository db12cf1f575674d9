//! Time entry payloads and views.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dtos::validate_positive;
use crate::models::{TimeEntry, UpsertTimeEntry};

#[derive(Debug, Deserialize, Validate)]
pub struct TimeEntryPayload {
    pub id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    #[validate(length(min = 1, max = 500, message = "description is required"))]
    pub description: String,
    pub entry_date: NaiveDate,
    #[validate(custom(function = "validate_positive"))]
    pub hours: Decimal,
    pub rate: Option<Decimal>,
    #[serde(default = "default_billable")]
    pub billable: bool,
    #[serde(default)]
    pub invoiced: bool,
}

fn default_billable() -> bool {
    true
}

impl From<TimeEntryPayload> for UpsertTimeEntry {
    fn from(payload: TimeEntryPayload) -> Self {
        UpsertTimeEntry {
            id: payload.id,
            client_id: payload.client_id,
            description: payload.description,
            entry_date: payload.entry_date,
            hours: payload.hours,
            rate: payload.rate,
            billable: payload.billable,
            invoiced: payload.invoiced,
        }
    }
}

/// Time entry as rendered to callers, hours and rate as plain numbers.
#[derive(Debug, Clone, Serialize)]
pub struct TimeEntryView {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub description: String,
    pub entry_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub hours: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub rate: Option<Decimal>,
    pub billable: bool,
    pub invoiced: bool,
    pub created_utc: DateTime<Utc>,
}

impl From<TimeEntry> for TimeEntryView {
    fn from(entry: TimeEntry) -> Self {
        TimeEntryView {
            id: entry.id,
            client_id: entry.client_id,
            description: entry.description,
            entry_date: entry.entry_date,
            hours: entry.hours,
            rate: entry.rate,
            billable: entry.billable,
            invoiced: entry.invoiced,
            created_utc: entry.created_utc,
        }
    }
}
