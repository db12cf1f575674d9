//! Maintenance operations: share-token backfill for legacy rows.

use super::Database;
use crate::services::numbering;
use serde::Serialize;
use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;

/// Rows updated per document family by one backfill run. A second run over
/// the same data reports all zeros.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BackfillReport {
    pub invoices: u64,
    pub quotations: u64,
    pub receipts: u64,
    pub contracts: u64,
}

impl BackfillReport {
    pub fn total(&self) -> u64 {
        self.invoices + self.quotations + self.receipts + self.contracts
    }
}

impl Database {
    /// Assign a share token to every document lacking one, across all four
    /// families. Idempotent: the `token IS NULL` guard on each update means
    /// rerunning never touches an already-tokened row.
    #[instrument(skip(self))]
    pub async fn backfill_tokens(&self) -> Result<BackfillReport, AppError> {
        let report = BackfillReport {
            invoices: self.backfill_table_tokens("invoices").await?,
            quotations: self.backfill_table_tokens("quotations").await?,
            receipts: self.backfill_table_tokens("receipts").await?,
            contracts: self.backfill_table_tokens("contracts").await?,
        };

        info!(
            invoices = report.invoices,
            quotations = report.quotations,
            receipts = report.receipts,
            contracts = report.contracts,
            "Token backfill completed"
        );

        Ok(report)
    }

    async fn backfill_table_tokens(&self, table: &str) -> Result<u64, AppError> {
        // Table names come from the fixed list above, never from input.
        let ids: Vec<(Uuid,)> =
            sqlx::query_as(&format!("SELECT id FROM {table} WHERE token IS NULL"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!(
                        "Failed to scan {} for missing tokens: {}",
                        table,
                        e
                    ))
                })?;

        let mut updated = 0u64;
        for (id,) in ids {
            let result = sqlx::query(&format!(
                "UPDATE {table} SET token = $1 WHERE id = $2 AND token IS NULL"
            ))
            .bind(numbering::new_share_token())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Failed to backfill token on {}: {}",
                    table,
                    e
                ))
            })?;
            updated += result.rows_affected();
        }

        Ok(updated)
    }
}
