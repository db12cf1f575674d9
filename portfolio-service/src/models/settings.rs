//! Per-owner invoicing settings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Business/branding defaults for one owner. Joined live onto every document
/// read; never snapshotted onto the documents themselves.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceSettings {
    pub owner_id: Uuid,
    pub business_name: String,
    pub business_email: String,
    pub business_phone: Option<String>,
    pub business_address: Option<String>,
    pub business_city: Option<String>,
    pub business_state: Option<String>,
    pub business_zip_code: Option<String>,
    pub business_country: Option<String>,
    pub tax_id: Option<String>,
    pub logo_url: Option<String>,
    pub default_currency: String,
    pub default_tax_rate: Decimal,
    pub default_payment_terms: String,
    pub invoice_prefix: String,
    pub next_invoice_number: i64,
    pub updated_utc: DateTime<Utc>,
}

impl InvoiceSettings {
    /// The documented placeholder returned when an owner has no settings row.
    /// Reading it never creates the row; the first issued number does.
    pub fn defaulted(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            business_name: String::new(),
            business_email: String::new(),
            business_phone: None,
            business_address: None,
            business_city: None,
            business_state: None,
            business_zip_code: None,
            business_country: None,
            tax_id: None,
            logo_url: None,
            default_currency: "USD".to_string(),
            default_tax_rate: Decimal::ZERO,
            default_payment_terms: "Net 30".to_string(),
            invoice_prefix: "INV-".to_string(),
            next_invoice_number: 1,
            updated_utc: Utc::now(),
        }
    }
}

/// Input for upserting the caller's settings. The numbering counter is not
/// settable below its current value by accident: it is taken as-is only on
/// first insert and otherwise left to the issuer.
#[derive(Debug, Clone)]
pub struct UpsertSettings {
    pub business_name: String,
    pub business_email: String,
    pub business_phone: Option<String>,
    pub business_address: Option<String>,
    pub business_city: Option<String>,
    pub business_state: Option<String>,
    pub business_zip_code: Option<String>,
    pub business_country: Option<String>,
    pub tax_id: Option<String>,
    pub logo_url: Option<String>,
    pub default_currency: String,
    pub default_tax_rate: Decimal,
    pub default_payment_terms: String,
    pub invoice_prefix: String,
}
