//! Invoice model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::NewLineItem;

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    /// Strict parse; anything outside the domain is a validation error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(InvoiceStatus::Draft),
            "sent" => Some(InvoiceStatus::Sent),
            "paid" => Some(InvoiceStatus::Paid),
            "overdue" => Some(InvoiceStatus::Overdue),
            "cancelled" => Some(InvoiceStatus::Cancelled),
            _ => None,
        }
    }
}

/// How a document-level discount is applied to the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(DiscountType::Percentage),
            "fixed" => Some(DiscountType::Fixed),
            _ => None,
        }
    }
}

/// Invoice document. `token` is nullable only for legacy rows awaiting
/// backfill; the write path always stamps one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub invoice_number: String,
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub discount: Decimal,
    pub discount_type: String,
    pub total: Decimal,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub currency: String,
    pub token: Option<Uuid>,
    pub view_count: i64,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Input for creating an invoice, or fully replacing one on update.
/// Totals are already computed by the shared totals engine; the database
/// layer persists them verbatim in one transaction with the items.
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub discount: Decimal,
    pub discount_type: DiscountType,
    pub total: Decimal,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub currency: String,
    pub items: Vec<NewLineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_parse() {
        for status in [
            InvoiceStatus::Draft,
            InvoiceStatus::Sent,
            InvoiceStatus::Paid,
            InvoiceStatus::Overdue,
            InvoiceStatus::Cancelled,
        ] {
            assert_eq!(InvoiceStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(InvoiceStatus::parse("issued"), None);
        assert_eq!(InvoiceStatus::parse(""), None);
        assert_eq!(InvoiceStatus::parse("Draft"), None);
    }

    #[test]
    fn discount_type_parses_both_variants_only() {
        assert_eq!(DiscountType::parse("percentage"), Some(DiscountType::Percentage));
        assert_eq!(DiscountType::parse("fixed"), Some(DiscountType::Fixed));
        assert_eq!(DiscountType::parse("percent"), None);
    }
}
