//! Quotation queries.

use super::Database;
use crate::models::{CreateQuotation, LineItem, Quotation};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::numbering;
use service_core::error::AppError;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const QUOTATION_COLUMNS: &str = "id, owner_id, quotation_number, client_id, issue_date, \
     valid_until, status, subtotal, tax_rate, tax_amount, discount, discount_type, total, \
     notes, terms, currency, token, view_count, created_utc, updated_utc";

const ITEM_COLUMNS: &str = "id, document_id, owner_id, description, quantity, rate, amount, sort_order";

impl Database {
    /// Create a quotation under an already-issued number, with token-collision
    /// retry, header and items in one transaction.
    #[instrument(skip(self, input), fields(owner_id = %owner_id, quotation_number = %quotation_number))]
    pub async fn create_quotation(
        &self,
        owner_id: Uuid,
        quotation_number: &str,
        input: &CreateQuotation,
    ) -> Result<Quotation, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_quotation"])
            .start_timer();

        for attempt in 1..=numbering::TOKEN_INSERT_ATTEMPTS {
            let token = numbering::new_share_token();
            let mut tx = self.pool.begin().await.map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
            })?;

            let inserted = sqlx::query_as::<_, Quotation>(&format!(
                r#"
                INSERT INTO quotations (
                    id, owner_id, quotation_number, client_id, issue_date, valid_until, status,
                    subtotal, tax_rate, tax_amount, discount, discount_type, total,
                    notes, terms, currency, token
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                RETURNING {QUOTATION_COLUMNS}
                "#
            ))
            .bind(Uuid::new_v4())
            .bind(owner_id)
            .bind(quotation_number)
            .bind(input.client_id)
            .bind(input.issue_date)
            .bind(input.valid_until)
            .bind(input.status.as_str())
            .bind(input.subtotal)
            .bind(input.tax_rate)
            .bind(input.tax_amount)
            .bind(input.discount)
            .bind(input.discount_type.as_str())
            .bind(input.total)
            .bind(&input.notes)
            .bind(&input.terms)
            .bind(&input.currency)
            .bind(token)
            .fetch_one(&mut *tx)
            .await;

            let quotation = match inserted {
                Ok(quotation) => quotation,
                Err(ref e) if numbering::is_token_collision(e) => {
                    warn!(attempt = attempt, "Share token collision, regenerating");
                    continue;
                }
                Err(e) => {
                    return Err(AppError::DatabaseError(anyhow::anyhow!(
                        "Failed to create quotation: {}",
                        e
                    )))
                }
            };

            Self::insert_quotation_items(&mut tx, owner_id, quotation.id, input).await?;

            tx.commit().await.map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to commit quotation: {}", e))
            })?;

            timer.observe_duration();

            info!(
                quotation_id = %quotation.id,
                quotation_number = %quotation.quotation_number,
                "Quotation created"
            );

            return Ok(quotation);
        }

        Err(AppError::InternalError(anyhow::anyhow!(
            "Share token generation kept colliding"
        )))
    }

    /// Fully replace a quotation's header and items.
    #[instrument(skip(self, input), fields(owner_id = %owner_id, quotation_id = %quotation_id))]
    pub async fn update_quotation(
        &self,
        owner_id: Uuid,
        quotation_id: Uuid,
        input: &CreateQuotation,
    ) -> Result<Option<Quotation>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_quotation"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let quotation = sqlx::query_as::<_, Quotation>(&format!(
            r#"
            UPDATE quotations
            SET client_id = $3, issue_date = $4, valid_until = $5, status = $6,
                subtotal = $7, tax_rate = $8, tax_amount = $9, discount = $10,
                discount_type = $11, total = $12, notes = $13, terms = $14,
                currency = $15, updated_utc = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING {QUOTATION_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(quotation_id)
        .bind(input.client_id)
        .bind(input.issue_date)
        .bind(input.valid_until)
        .bind(input.status.as_str())
        .bind(input.subtotal)
        .bind(input.tax_rate)
        .bind(input.tax_amount)
        .bind(input.discount)
        .bind(input.discount_type.as_str())
        .bind(input.total)
        .bind(&input.notes)
        .bind(&input.terms)
        .bind(&input.currency)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to update quotation: {}", e))
        })?;

        let Some(quotation) = quotation else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM quotation_items WHERE owner_id = $1 AND document_id = $2")
            .bind(owner_id)
            .bind(quotation_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to clear quotation items: {}", e))
            })?;

        Self::insert_quotation_items(&mut tx, owner_id, quotation.id, input).await?;

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit quotation update: {}", e))
        })?;

        timer.observe_duration();

        info!(quotation_id = %quotation.id, "Quotation updated");

        Ok(Some(quotation))
    }

    async fn insert_quotation_items(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        owner_id: Uuid,
        quotation_id: Uuid,
        input: &CreateQuotation,
    ) -> Result<(), AppError> {
        for (index, item) in input.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO quotation_items (id, document_id, owner_id, description, quantity,
                    rate, amount, sort_order)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(quotation_id)
            .bind(owner_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.rate)
            .bind(item.amount)
            .bind(index as i32)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to insert quotation item: {}", e))
            })?;
        }
        Ok(())
    }

    /// Get a quotation by id.
    #[instrument(skip(self), fields(owner_id = %owner_id, quotation_id = %quotation_id))]
    pub async fn get_quotation(
        &self,
        owner_id: Uuid,
        quotation_id: Uuid,
    ) -> Result<Option<Quotation>, AppError> {
        let quotation = sqlx::query_as::<_, Quotation>(&format!(
            r#"
            SELECT {QUOTATION_COLUMNS}
            FROM quotations
            WHERE owner_id = $1 AND id = $2
            "#
        ))
        .bind(owner_id)
        .bind(quotation_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get quotation: {}", e)))?;

        Ok(quotation)
    }

    /// List all quotations for an owner, newest first.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_quotations(&self, owner_id: Uuid) -> Result<Vec<Quotation>, AppError> {
        let quotations = sqlx::query_as::<_, Quotation>(&format!(
            r#"
            SELECT {QUOTATION_COLUMNS}
            FROM quotations
            WHERE owner_id = $1
            ORDER BY created_utc DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list quotations: {}", e))
        })?;

        Ok(quotations)
    }

    /// Delete a quotation; items cascade.
    #[instrument(skip(self), fields(owner_id = %owner_id, quotation_id = %quotation_id))]
    pub async fn delete_quotation(
        &self,
        owner_id: Uuid,
        quotation_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM quotations WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(quotation_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete quotation: {}", e))
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(quotation_id = %quotation_id, "Quotation deleted");
        }

        Ok(deleted)
    }

    /// Resolve a share token to a quotation.
    #[instrument(skip(self))]
    pub async fn get_quotation_by_token(&self, token: Uuid) -> Result<Option<Quotation>, AppError> {
        let quotation = sqlx::query_as::<_, Quotation>(&format!(
            r#"
            SELECT {QUOTATION_COLUMNS}
            FROM quotations
            WHERE token = $1
            "#
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to resolve quotation token: {}", e))
        })?;

        Ok(quotation)
    }

    /// Get the line items of one quotation, in display order.
    #[instrument(skip(self), fields(owner_id = %owner_id, quotation_id = %quotation_id))]
    pub async fn get_quotation_items(
        &self,
        owner_id: Uuid,
        quotation_id: Uuid,
    ) -> Result<Vec<LineItem>, AppError> {
        let items = sqlx::query_as::<_, LineItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM quotation_items
            WHERE owner_id = $1 AND document_id = $2
            ORDER BY sort_order
            "#
        ))
        .bind(owner_id)
        .bind(quotation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get quotation items: {}", e))
        })?;

        Ok(items)
    }

    /// Get every quotation line item an owner has, for bulk assembly.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_quotation_items_for_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<LineItem>, AppError> {
        let items = sqlx::query_as::<_, LineItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM quotation_items
            WHERE owner_id = $1
            ORDER BY document_id, sort_order
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list quotation items: {}", e))
        })?;

        Ok(items)
    }

    /// Bump the public view counter. Best-effort at the call site.
    pub async fn increment_quotation_views(&self, quotation_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE quotations SET view_count = view_count + 1 WHERE id = $1")
            .bind(quotation_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to increment views: {}", e))
            })?;
        Ok(())
    }
}
