//! Time entry queries.

use super::Database;
use crate::models::{TimeEntry, UpsertTimeEntry};
use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;

const TIME_ENTRY_COLUMNS: &str = "id, owner_id, client_id, description, entry_date, hours, \
     rate, billable, invoiced, created_utc";

impl Database {
    /// Create or update a time entry.
    #[instrument(skip(self, input), fields(owner_id = %owner_id))]
    pub async fn upsert_time_entry(
        &self,
        owner_id: Uuid,
        input: &UpsertTimeEntry,
    ) -> Result<TimeEntry, AppError> {
        if let Some(id) = input.id {
            let updated = sqlx::query_as::<_, TimeEntry>(&format!(
                r#"
                UPDATE time_entries
                SET client_id = $3, description = $4, entry_date = $5, hours = $6,
                    rate = $7, billable = $8, invoiced = $9
                WHERE owner_id = $1 AND id = $2
                RETURNING {TIME_ENTRY_COLUMNS}
                "#
            ))
            .bind(owner_id)
            .bind(id)
            .bind(input.client_id)
            .bind(&input.description)
            .bind(input.entry_date)
            .bind(input.hours)
            .bind(input.rate)
            .bind(input.billable)
            .bind(input.invoiced)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to update time entry: {}", e))
            })?;

            if let Some(entry) = updated {
                info!(time_entry_id = %entry.id, "Time entry updated");
                return Ok(entry);
            }
        }

        let entry = sqlx::query_as::<_, TimeEntry>(&format!(
            r#"
            INSERT INTO time_entries (id, owner_id, client_id, description, entry_date,
                hours, rate, billable, invoiced)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {TIME_ENTRY_COLUMNS}
            "#
        ))
        .bind(input.id.unwrap_or_else(Uuid::new_v4))
        .bind(owner_id)
        .bind(input.client_id)
        .bind(&input.description)
        .bind(input.entry_date)
        .bind(input.hours)
        .bind(input.rate)
        .bind(input.billable)
        .bind(input.invoiced)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to create time entry: {}", e))
        })?;

        info!(time_entry_id = %entry.id, "Time entry created");

        Ok(entry)
    }

    /// Get a time entry by id.
    #[instrument(skip(self), fields(owner_id = %owner_id, time_entry_id = %time_entry_id))]
    pub async fn get_time_entry(
        &self,
        owner_id: Uuid,
        time_entry_id: Uuid,
    ) -> Result<Option<TimeEntry>, AppError> {
        let entry = sqlx::query_as::<_, TimeEntry>(&format!(
            r#"
            SELECT {TIME_ENTRY_COLUMNS}
            FROM time_entries
            WHERE owner_id = $1 AND id = $2
            "#
        ))
        .bind(owner_id)
        .bind(time_entry_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get time entry: {}", e)))?;

        Ok(entry)
    }

    /// List all time entries for an owner, newest work first.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_time_entries(&self, owner_id: Uuid) -> Result<Vec<TimeEntry>, AppError> {
        let entries = sqlx::query_as::<_, TimeEntry>(&format!(
            r#"
            SELECT {TIME_ENTRY_COLUMNS}
            FROM time_entries
            WHERE owner_id = $1
            ORDER BY entry_date DESC, created_utc DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list time entries: {}", e))
        })?;

        Ok(entries)
    }

    /// Delete a time entry.
    #[instrument(skip(self), fields(owner_id = %owner_id, time_entry_id = %time_entry_id))]
    pub async fn delete_time_entry(
        &self,
        owner_id: Uuid,
        time_entry_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM time_entries WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(time_entry_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete time entry: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}
