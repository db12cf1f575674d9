//! Invoice settings payloads and views.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dtos::validate_non_negative;
use crate::models::{InvoiceSettings, UpsertSettings};

#[derive(Debug, Deserialize, Validate)]
pub struct SettingsPayload {
    #[validate(length(min = 1, max = 200, message = "business name is required"))]
    pub business_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub business_email: String,
    #[validate(length(max = 50))]
    pub business_phone: Option<String>,
    #[validate(length(max = 500))]
    pub business_address: Option<String>,
    #[validate(length(max = 100))]
    pub business_city: Option<String>,
    #[validate(length(max = 100))]
    pub business_state: Option<String>,
    #[validate(length(max = 20))]
    pub business_zip_code: Option<String>,
    #[validate(length(max = 100))]
    pub business_country: Option<String>,
    #[validate(length(max = 50))]
    pub tax_id: Option<String>,
    #[validate(length(max = 500))]
    pub logo_url: Option<String>,
    #[validate(length(min = 3, max = 3, message = "currency must be a 3-letter code"))]
    pub default_currency: String,
    #[validate(custom(function = "validate_non_negative"))]
    pub default_tax_rate: Decimal,
    #[validate(length(min = 1, max = 100))]
    pub default_payment_terms: String,
    #[validate(length(min = 1, max = 20))]
    pub invoice_prefix: String,
}

impl From<SettingsPayload> for UpsertSettings {
    fn from(payload: SettingsPayload) -> Self {
        UpsertSettings {
            business_name: payload.business_name,
            business_email: payload.business_email,
            business_phone: payload.business_phone,
            business_address: payload.business_address,
            business_city: payload.business_city,
            business_state: payload.business_state,
            business_zip_code: payload.business_zip_code,
            business_country: payload.business_country,
            tax_id: payload.tax_id,
            logo_url: payload.logo_url,
            default_currency: payload.default_currency,
            default_tax_rate: payload.default_tax_rate,
            default_payment_terms: payload.default_payment_terms,
            invoice_prefix: payload.invoice_prefix,
        }
    }
}

/// Settings as rendered to callers: money/rate fields as plain numbers.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
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
    #[serde(with = "rust_decimal::serde::float")]
    pub default_tax_rate: Decimal,
    pub default_payment_terms: String,
    pub invoice_prefix: String,
    pub next_invoice_number: i64,
    pub updated_utc: DateTime<Utc>,
}

impl From<InvoiceSettings> for SettingsView {
    fn from(settings: InvoiceSettings) -> Self {
        SettingsView {
            owner_id: settings.owner_id,
            business_name: settings.business_name,
            business_email: settings.business_email,
            business_phone: settings.business_phone,
            business_address: settings.business_address,
            business_city: settings.business_city,
            business_state: settings.business_state,
            business_zip_code: settings.business_zip_code,
            business_country: settings.business_country,
            tax_id: settings.tax_id,
            logo_url: settings.logo_url,
            default_currency: settings.default_currency,
            default_tax_rate: settings.default_tax_rate,
            default_payment_terms: settings.default_payment_terms,
            invoice_prefix: settings.invoice_prefix,
            next_invoice_number: settings.next_invoice_number,
            updated_utc: settings.updated_utc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_as_documented() {
        let view = SettingsView::from(InvoiceSettings::defaulted(Uuid::new_v4()));
        assert_eq!(view.default_currency, "USD");
        assert_eq!(view.invoice_prefix, "INV-");
        assert_eq!(view.next_invoice_number, 1);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["default_tax_rate"].is_number());
    }
}
