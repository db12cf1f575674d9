//! Receipt queries.

use super::Database;
use crate::models::{CreateReceipt, LineItem, Receipt};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::numbering;
use service_core::error::AppError;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const RECEIPT_COLUMNS: &str = "id, owner_id, receipt_number, client_id, issue_date, \
     payment_date, payment_method, related_invoice_number, amount_paid, subtotal, tax_rate, \
     tax_amount, discount, discount_type, total, notes, currency, token, view_count, \
     created_utc, updated_utc";

const ITEM_COLUMNS: &str = "id, document_id, owner_id, description, quantity, rate, amount, sort_order";

impl Database {
    /// Create a receipt under an already-issued number, with token-collision
    /// retry, header and items in one transaction.
    #[instrument(skip(self, input), fields(owner_id = %owner_id, receipt_number = %receipt_number))]
    pub async fn create_receipt(
        &self,
        owner_id: Uuid,
        receipt_number: &str,
        input: &CreateReceipt,
    ) -> Result<Receipt, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_receipt"])
            .start_timer();

        for attempt in 1..=numbering::TOKEN_INSERT_ATTEMPTS {
            let token = numbering::new_share_token();
            let mut tx = self.pool.begin().await.map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
            })?;

            let inserted = sqlx::query_as::<_, Receipt>(&format!(
                r#"
                INSERT INTO receipts (
                    id, owner_id, receipt_number, client_id, issue_date, payment_date,
                    payment_method, related_invoice_number, amount_paid, subtotal, tax_rate,
                    tax_amount, discount, discount_type, total, notes, currency, token
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18)
                RETURNING {RECEIPT_COLUMNS}
                "#
            ))
            .bind(Uuid::new_v4())
            .bind(owner_id)
            .bind(receipt_number)
            .bind(input.client_id)
            .bind(input.issue_date)
            .bind(input.payment_date)
            .bind(&input.payment_method)
            .bind(&input.related_invoice_number)
            .bind(input.amount_paid)
            .bind(input.subtotal)
            .bind(input.tax_rate)
            .bind(input.tax_amount)
            .bind(input.discount)
            .bind(input.discount_type.as_str())
            .bind(input.total)
            .bind(&input.notes)
            .bind(&input.currency)
            .bind(token)
            .fetch_one(&mut *tx)
            .await;

            let receipt = match inserted {
                Ok(receipt) => receipt,
                Err(ref e) if numbering::is_token_collision(e) => {
                    warn!(attempt = attempt, "Share token collision, regenerating");
                    continue;
                }
                Err(e) => {
                    return Err(AppError::DatabaseError(anyhow::anyhow!(
                        "Failed to create receipt: {}",
                        e
                    )))
                }
            };

            Self::insert_receipt_items(&mut tx, owner_id, receipt.id, input).await?;

            tx.commit().await.map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to commit receipt: {}", e))
            })?;

            timer.observe_duration();

            info!(
                receipt_id = %receipt.id,
                receipt_number = %receipt.receipt_number,
                "Receipt created"
            );

            return Ok(receipt);
        }

        Err(AppError::InternalError(anyhow::anyhow!(
            "Share token generation kept colliding"
        )))
    }

    /// Fully replace a receipt's header and items.
    #[instrument(skip(self, input), fields(owner_id = %owner_id, receipt_id = %receipt_id))]
    pub async fn update_receipt(
        &self,
        owner_id: Uuid,
        receipt_id: Uuid,
        input: &CreateReceipt,
    ) -> Result<Option<Receipt>, AppError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let receipt = sqlx::query_as::<_, Receipt>(&format!(
            r#"
            UPDATE receipts
            SET client_id = $3, issue_date = $4, payment_date = $5, payment_method = $6,
                related_invoice_number = $7, amount_paid = $8, subtotal = $9, tax_rate = $10,
                tax_amount = $11, discount = $12, discount_type = $13, total = $14,
                notes = $15, currency = $16, updated_utc = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING {RECEIPT_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(receipt_id)
        .bind(input.client_id)
        .bind(input.issue_date)
        .bind(input.payment_date)
        .bind(&input.payment_method)
        .bind(&input.related_invoice_number)
        .bind(input.amount_paid)
        .bind(input.subtotal)
        .bind(input.tax_rate)
        .bind(input.tax_amount)
        .bind(input.discount)
        .bind(input.discount_type.as_str())
        .bind(input.total)
        .bind(&input.notes)
        .bind(&input.currency)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update receipt: {}", e)))?;

        let Some(receipt) = receipt else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM receipt_items WHERE owner_id = $1 AND document_id = $2")
            .bind(owner_id)
            .bind(receipt_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to clear receipt items: {}", e))
            })?;

        Self::insert_receipt_items(&mut tx, owner_id, receipt.id, input).await?;

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit receipt update: {}", e))
        })?;

        info!(receipt_id = %receipt.id, "Receipt updated");

        Ok(Some(receipt))
    }

    async fn insert_receipt_items(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        owner_id: Uuid,
        receipt_id: Uuid,
        input: &CreateReceipt,
    ) -> Result<(), AppError> {
        for (index, item) in input.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO receipt_items (id, document_id, owner_id, description, quantity,
                    rate, amount, sort_order)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(receipt_id)
            .bind(owner_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.rate)
            .bind(item.amount)
            .bind(index as i32)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to insert receipt item: {}", e))
            })?;
        }
        Ok(())
    }

    /// Get a receipt by id.
    #[instrument(skip(self), fields(owner_id = %owner_id, receipt_id = %receipt_id))]
    pub async fn get_receipt(
        &self,
        owner_id: Uuid,
        receipt_id: Uuid,
    ) -> Result<Option<Receipt>, AppError> {
        let receipt = sqlx::query_as::<_, Receipt>(&format!(
            r#"
            SELECT {RECEIPT_COLUMNS}
            FROM receipts
            WHERE owner_id = $1 AND id = $2
            "#
        ))
        .bind(owner_id)
        .bind(receipt_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get receipt: {}", e)))?;

        Ok(receipt)
    }

    /// List all receipts for an owner, newest first.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_receipts(&self, owner_id: Uuid) -> Result<Vec<Receipt>, AppError> {
        let receipts = sqlx::query_as::<_, Receipt>(&format!(
            r#"
            SELECT {RECEIPT_COLUMNS}
            FROM receipts
            WHERE owner_id = $1
            ORDER BY created_utc DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list receipts: {}", e)))?;

        Ok(receipts)
    }

    /// Delete a receipt; items cascade.
    #[instrument(skip(self), fields(owner_id = %owner_id, receipt_id = %receipt_id))]
    pub async fn delete_receipt(&self, owner_id: Uuid, receipt_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM receipts WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(receipt_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete receipt: {}", e))
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(receipt_id = %receipt_id, "Receipt deleted");
        }

        Ok(deleted)
    }

    /// Resolve a share token to a receipt.
    #[instrument(skip(self))]
    pub async fn get_receipt_by_token(&self, token: Uuid) -> Result<Option<Receipt>, AppError> {
        let receipt = sqlx::query_as::<_, Receipt>(&format!(
            r#"
            SELECT {RECEIPT_COLUMNS}
            FROM receipts
            WHERE token = $1
            "#
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to resolve receipt token: {}", e))
        })?;

        Ok(receipt)
    }

    /// Get the line items of one receipt, in display order.
    #[instrument(skip(self), fields(owner_id = %owner_id, receipt_id = %receipt_id))]
    pub async fn get_receipt_items(
        &self,
        owner_id: Uuid,
        receipt_id: Uuid,
    ) -> Result<Vec<LineItem>, AppError> {
        let items = sqlx::query_as::<_, LineItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM receipt_items
            WHERE owner_id = $1 AND document_id = $2
            ORDER BY sort_order
            "#
        ))
        .bind(owner_id)
        .bind(receipt_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get receipt items: {}", e))
        })?;

        Ok(items)
    }

    /// Get every receipt line item an owner has, for bulk assembly.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_receipt_items_for_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<LineItem>, AppError> {
        let items = sqlx::query_as::<_, LineItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM receipt_items
            WHERE owner_id = $1
            ORDER BY document_id, sort_order
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list receipt items: {}", e))
        })?;

        Ok(items)
    }

    /// Bump the public view counter. Best-effort at the call site.
    pub async fn increment_receipt_views(&self, receipt_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE receipts SET view_count = view_count + 1 WHERE id = $1")
            .bind(receipt_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to increment views: {}", e))
            })?;
        Ok(())
    }
}
