//! Invoice queries.

use super::Database;
use crate::models::{CreateInvoice, Invoice, LineItem};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::numbering;
use service_core::error::AppError;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const INVOICE_COLUMNS: &str = "id, owner_id, invoice_number, client_id, issue_date, due_date, \
     status, subtotal, tax_rate, tax_amount, discount, discount_type, total, notes, terms, \
     currency, token, view_count, created_utc, updated_utc";

const ITEM_COLUMNS: &str = "id, document_id, owner_id, description, quantity, rate, amount, sort_order";

impl Database {
    /// Create an invoice under an already-issued number. The header and its
    /// items are written in one transaction; a share-token collision rolls
    /// back and retries with a fresh token.
    #[instrument(skip(self, input), fields(owner_id = %owner_id, invoice_number = %invoice_number))]
    pub async fn create_invoice(
        &self,
        owner_id: Uuid,
        invoice_number: &str,
        input: &CreateInvoice,
    ) -> Result<Invoice, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_invoice"])
            .start_timer();

        for attempt in 1..=numbering::TOKEN_INSERT_ATTEMPTS {
            let token = numbering::new_share_token();
            let mut tx = self.pool.begin().await.map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
            })?;

            let inserted = sqlx::query_as::<_, Invoice>(&format!(
                r#"
                INSERT INTO invoices (
                    id, owner_id, invoice_number, client_id, issue_date, due_date, status,
                    subtotal, tax_rate, tax_amount, discount, discount_type, total,
                    notes, terms, currency, token
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                RETURNING {INVOICE_COLUMNS}
                "#
            ))
            .bind(Uuid::new_v4())
            .bind(owner_id)
            .bind(invoice_number)
            .bind(input.client_id)
            .bind(input.issue_date)
            .bind(input.due_date)
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

            let invoice = match inserted {
                Ok(invoice) => invoice,
                Err(ref e) if numbering::is_token_collision(e) => {
                    warn!(attempt = attempt, "Share token collision, regenerating");
                    continue;
                }
                Err(e) => {
                    return Err(AppError::DatabaseError(anyhow::anyhow!(
                        "Failed to create invoice: {}",
                        e
                    )))
                }
            };

            Self::insert_invoice_items(&mut tx, owner_id, invoice.id, input).await?;

            tx.commit().await.map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to commit invoice: {}", e))
            })?;

            timer.observe_duration();

            info!(
                invoice_id = %invoice.id,
                invoice_number = %invoice.invoice_number,
                "Invoice created"
            );

            return Ok(invoice);
        }

        Err(AppError::InternalError(anyhow::anyhow!(
            "Share token generation kept colliding"
        )))
    }

    /// Fully replace an invoice's header and items. Number and token are
    /// never touched after creation.
    #[instrument(skip(self, input), fields(owner_id = %owner_id, invoice_id = %invoice_id))]
    pub async fn update_invoice(
        &self,
        owner_id: Uuid,
        invoice_id: Uuid,
        input: &CreateInvoice,
    ) -> Result<Option<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_invoice"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            UPDATE invoices
            SET client_id = $3, issue_date = $4, due_date = $5, status = $6,
                subtotal = $7, tax_rate = $8, tax_amount = $9, discount = $10,
                discount_type = $11, total = $12, notes = $13, terms = $14,
                currency = $15, updated_utc = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(invoice_id)
        .bind(input.client_id)
        .bind(input.issue_date)
        .bind(input.due_date)
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
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update invoice: {}", e)))?;

        let Some(invoice) = invoice else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM invoice_items WHERE owner_id = $1 AND document_id = $2")
            .bind(owner_id)
            .bind(invoice_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to clear invoice items: {}", e))
            })?;

        Self::insert_invoice_items(&mut tx, owner_id, invoice.id, input).await?;

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit invoice update: {}", e))
        })?;

        timer.observe_duration();

        info!(invoice_id = %invoice.id, "Invoice updated");

        Ok(Some(invoice))
    }

    async fn insert_invoice_items(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        owner_id: Uuid,
        invoice_id: Uuid,
        input: &CreateInvoice,
    ) -> Result<(), AppError> {
        for (index, item) in input.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (id, document_id, owner_id, description, quantity,
                    rate, amount, sort_order)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(invoice_id)
            .bind(owner_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.rate)
            .bind(item.amount)
            .bind(index as i32)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to insert invoice item: {}", e))
            })?;
        }
        Ok(())
    }

    /// Get an invoice by id.
    #[instrument(skip(self), fields(owner_id = %owner_id, invoice_id = %invoice_id))]
    pub async fn get_invoice(
        &self,
        owner_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<Option<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_invoice"])
            .start_timer();

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE owner_id = $1 AND id = $2
            "#
        ))
        .bind(owner_id)
        .bind(invoice_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get invoice: {}", e)))?;

        timer.observe_duration();

        Ok(invoice)
    }

    /// List all invoices for an owner, newest first.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_invoices(&self, owner_id: Uuid) -> Result<Vec<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_invoices"])
            .start_timer();

        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE owner_id = $1
            ORDER BY created_utc DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list invoices: {}", e)))?;

        timer.observe_duration();

        Ok(invoices)
    }

    /// Delete an invoice; items cascade.
    #[instrument(skip(self), fields(owner_id = %owner_id, invoice_id = %invoice_id))]
    pub async fn delete_invoice(&self, owner_id: Uuid, invoice_id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_invoice"])
            .start_timer();

        let result = sqlx::query("DELETE FROM invoices WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(invoice_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete invoice: {}", e))
            })?;

        timer.observe_duration();

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(invoice_id = %invoice_id, "Invoice deleted");
        }

        Ok(deleted)
    }

    /// Resolve a share token to an invoice. Unscoped by owner: the token is
    /// the credential.
    #[instrument(skip(self))]
    pub async fn get_invoice_by_token(&self, token: Uuid) -> Result<Option<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_invoice_by_token"])
            .start_timer();

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE token = $1
            "#
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to resolve invoice token: {}", e))
        })?;

        timer.observe_duration();

        Ok(invoice)
    }

    /// Get the line items of one invoice, in display order.
    #[instrument(skip(self), fields(owner_id = %owner_id, invoice_id = %invoice_id))]
    pub async fn get_invoice_items(
        &self,
        owner_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<Vec<LineItem>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_invoice_items"])
            .start_timer();

        let items = sqlx::query_as::<_, LineItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM invoice_items
            WHERE owner_id = $1 AND document_id = $2
            ORDER BY sort_order
            "#
        ))
        .bind(owner_id)
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get invoice items: {}", e))
        })?;

        timer.observe_duration();

        Ok(items)
    }

    /// Get every invoice line item an owner has, for bulk assembly.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_invoice_items_for_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<LineItem>, AppError> {
        let items = sqlx::query_as::<_, LineItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM invoice_items
            WHERE owner_id = $1
            ORDER BY document_id, sort_order
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list invoice items: {}", e))
        })?;

        Ok(items)
    }

    /// Bump the public view counter. Best-effort at the call site.
    pub async fn increment_invoice_views(&self, invoice_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE invoices SET view_count = view_count + 1 WHERE id = $1")
            .bind(invoice_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to increment views: {}", e))
            })?;
        Ok(())
    }
}
