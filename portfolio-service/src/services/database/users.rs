//! Owner account queries.

use super::Database;
use crate::models::User;
use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;

impl Database {
    /// Create the owner account, or rotate its password hash if the email
    /// already exists. Called once at startup from configuration.
    #[instrument(skip(self, password_hash))]
    pub async fn upsert_owner(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE SET password_hash = $3
            RETURNING id, email, password_hash, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to upsert owner: {}", e)))?;

        info!(user_id = %user.id, "Owner account ready");

        Ok(user)
    }

    /// Look up a user by login email.
    #[instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_utc
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get user: {}", e)))?;

        Ok(user)
    }
}
