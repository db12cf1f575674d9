//! Resume queries.

use super::Database;
use crate::models::{Resume, UpsertResume};
use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;

const RESUME_COLUMNS: &str = "id, owner_id, title, content, is_default, created_utc, updated_utc";

impl Database {
    /// Create or update a resume. Marking one resume default clears the flag
    /// on the owner's others.
    #[instrument(skip(self, input), fields(owner_id = %owner_id))]
    pub async fn upsert_resume(
        &self,
        owner_id: Uuid,
        input: &UpsertResume,
    ) -> Result<Resume, AppError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        if input.is_default {
            sqlx::query("UPDATE resumes SET is_default = FALSE WHERE owner_id = $1")
                .bind(owner_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to clear default: {}", e))
                })?;
        }

        let resume = if let Some(id) = input.id {
            sqlx::query_as::<_, Resume>(&format!(
                r#"
                UPDATE resumes
                SET title = $3, content = $4, is_default = $5, updated_utc = NOW()
                WHERE owner_id = $1 AND id = $2
                RETURNING {RESUME_COLUMNS}
                "#
            ))
            .bind(owner_id)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_default)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to update resume: {}", e))
            })?
        } else {
            None
        };

        let resume = match resume {
            Some(resume) => resume,
            None => sqlx::query_as::<_, Resume>(&format!(
                r#"
                INSERT INTO resumes (id, owner_id, title, content, is_default)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {RESUME_COLUMNS}
                "#
            ))
            .bind(input.id.unwrap_or_else(Uuid::new_v4))
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_default)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to create resume: {}", e))
            })?,
        };

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit resume: {}", e))
        })?;

        info!(resume_id = %resume.id, "Resume saved");

        Ok(resume)
    }

    /// Get a resume by id.
    #[instrument(skip(self), fields(owner_id = %owner_id, resume_id = %resume_id))]
    pub async fn get_resume(
        &self,
        owner_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<Resume>, AppError> {
        let resume = sqlx::query_as::<_, Resume>(&format!(
            r#"
            SELECT {RESUME_COLUMNS}
            FROM resumes
            WHERE owner_id = $1 AND id = $2
            "#
        ))
        .bind(owner_id)
        .bind(resume_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get resume: {}", e)))?;

        Ok(resume)
    }

    /// List all resumes for an owner, default first, then newest.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_resumes(&self, owner_id: Uuid) -> Result<Vec<Resume>, AppError> {
        let resumes = sqlx::query_as::<_, Resume>(&format!(
            r#"
            SELECT {RESUME_COLUMNS}
            FROM resumes
            WHERE owner_id = $1
            ORDER BY is_default DESC, created_utc DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list resumes: {}", e)))?;

        Ok(resumes)
    }

    /// Delete a resume.
    #[instrument(skip(self), fields(owner_id = %owner_id, resume_id = %resume_id))]
    pub async fn delete_resume(&self, owner_id: Uuid, resume_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(resume_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete resume: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}
