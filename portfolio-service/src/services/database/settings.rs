//! Invoice settings queries.

use super::Database;
use crate::models::{InvoiceSettings, UpsertSettings};
use crate::services::metrics::DB_QUERY_DURATION;
use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;

const SETTINGS_COLUMNS: &str = "owner_id, business_name, business_email, business_phone, \
     business_address, business_city, business_state, business_zip_code, business_country, \
     tax_id, logo_url, default_currency, default_tax_rate, default_payment_terms, \
     invoice_prefix, next_invoice_number, updated_utc";

impl Database {
    /// Get the owner's settings row, if one exists. Callers fall back to
    /// `InvoiceSettings::defaulted` without creating anything.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn get_settings(&self, owner_id: Uuid) -> Result<Option<InvoiceSettings>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_settings"])
            .start_timer();

        let settings = sqlx::query_as::<_, InvoiceSettings>(&format!(
            r#"
            SELECT {SETTINGS_COLUMNS}
            FROM invoice_settings
            WHERE owner_id = $1
            "#
        ))
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get settings: {}", e)))?;

        timer.observe_duration();

        Ok(settings)
    }

    /// Create or replace the owner's settings. The numbering counter is left
    /// untouched on update; only the issuer advances it.
    #[instrument(skip(self, input), fields(owner_id = %owner_id))]
    pub async fn upsert_settings(
        &self,
        owner_id: Uuid,
        input: &UpsertSettings,
    ) -> Result<InvoiceSettings, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["upsert_settings"])
            .start_timer();

        let settings = sqlx::query_as::<_, InvoiceSettings>(&format!(
            r#"
            INSERT INTO invoice_settings (
                owner_id, business_name, business_email, business_phone, business_address,
                business_city, business_state, business_zip_code, business_country, tax_id,
                logo_url, default_currency, default_tax_rate, default_payment_terms,
                invoice_prefix, updated_utc
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW())
            ON CONFLICT (owner_id) DO UPDATE SET
                business_name = $2,
                business_email = $3,
                business_phone = $4,
                business_address = $5,
                business_city = $6,
                business_state = $7,
                business_zip_code = $8,
                business_country = $9,
                tax_id = $10,
                logo_url = $11,
                default_currency = $12,
                default_tax_rate = $13,
                default_payment_terms = $14,
                invoice_prefix = $15,
                updated_utc = NOW()
            RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(&input.business_name)
        .bind(&input.business_email)
        .bind(&input.business_phone)
        .bind(&input.business_address)
        .bind(&input.business_city)
        .bind(&input.business_state)
        .bind(&input.business_zip_code)
        .bind(&input.business_country)
        .bind(&input.tax_id)
        .bind(&input.logo_url)
        .bind(&input.default_currency)
        .bind(input.default_tax_rate)
        .bind(&input.default_payment_terms)
        .bind(&input.invoice_prefix)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to upsert settings: {}", e))
        })?;

        timer.observe_duration();

        info!(owner_id = %owner_id, "Settings saved");

        Ok(settings)
    }
}
