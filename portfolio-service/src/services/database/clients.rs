//! Client registry queries.

use super::Database;
use crate::models::{Client, UpsertClient};
use crate::services::metrics::DB_QUERY_DURATION;
use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;

const CLIENT_COLUMNS: &str = "id, owner_id, name, email, phone, address, city, state, \
     zip_code, country, tax_id, created_utc";

impl Database {
    /// Create or update a client. A supplied id that matches an owned row is
    /// an update; any other id (or none) creates a new row.
    #[instrument(skip(self, input), fields(owner_id = %owner_id))]
    pub async fn upsert_client(
        &self,
        owner_id: Uuid,
        input: &UpsertClient,
    ) -> Result<Client, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["upsert_client"])
            .start_timer();

        if let Some(id) = input.id {
            let updated = sqlx::query_as::<_, Client>(&format!(
                r#"
                UPDATE clients
                SET name = $3, email = $4, phone = $5, address = $6, city = $7,
                    state = $8, zip_code = $9, country = $10, tax_id = $11
                WHERE owner_id = $1 AND id = $2
                RETURNING {CLIENT_COLUMNS}
                "#
            ))
            .bind(owner_id)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .bind(&input.country)
            .bind(&input.tax_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to update client: {}", e))
            })?;

            if let Some(client) = updated {
                timer.observe_duration();
                info!(client_id = %client.id, "Client updated");
                return Ok(client);
            }
        }

        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            INSERT INTO clients (id, owner_id, name, email, phone, address, city, state,
                zip_code, country, tax_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(input.id.unwrap_or_else(Uuid::new_v4))
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.zip_code)
        .bind(&input.country)
        .bind(&input.tax_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!("Client id already exists"))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create client: {}", e)),
        })?;

        timer.observe_duration();

        info!(client_id = %client.id, "Client created");

        Ok(client)
    }

    /// Get a client by id.
    #[instrument(skip(self), fields(owner_id = %owner_id, client_id = %client_id))]
    pub async fn get_client(
        &self,
        owner_id: Uuid,
        client_id: Uuid,
    ) -> Result<Option<Client>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_client"])
            .start_timer();

        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            SELECT {CLIENT_COLUMNS}
            FROM clients
            WHERE owner_id = $1 AND id = $2
            "#
        ))
        .bind(owner_id)
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get client: {}", e)))?;

        timer.observe_duration();

        Ok(client)
    }

    /// List all clients for an owner, newest first.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_clients(&self, owner_id: Uuid) -> Result<Vec<Client>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_clients"])
            .start_timer();

        let clients = sqlx::query_as::<_, Client>(&format!(
            r#"
            SELECT {CLIENT_COLUMNS}
            FROM clients
            WHERE owner_id = $1
            ORDER BY created_utc DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list clients: {}", e)))?;

        timer.observe_duration();

        Ok(clients)
    }

    /// Delete a client. Rejected with a conflict while any document still
    /// references the row.
    #[instrument(skip(self), fields(owner_id = %owner_id, client_id = %client_id))]
    pub async fn delete_client(&self, owner_id: Uuid, client_id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_client"])
            .start_timer();

        let result = sqlx::query(
            r#"
            DELETE FROM clients
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner_id)
        .bind(client_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::Conflict(anyhow::anyhow!(
                    "Client is referenced by existing documents"
                ))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to delete client: {}", e)),
        })?;

        timer.observe_duration();

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(client_id = %client_id, "Client deleted");
        }

        Ok(deleted)
    }
}
