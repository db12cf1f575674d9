//! Quotation model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{DiscountType, NewLineItem};

/// Quotation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
            QuotationStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(QuotationStatus::Draft),
            "sent" => Some(QuotationStatus::Sent),
            "accepted" => Some(QuotationStatus::Accepted),
            "rejected" => Some(QuotationStatus::Rejected),
            "expired" => Some(QuotationStatus::Expired),
            _ => None,
        }
    }
}

/// Quotation document: invoice shape plus a validity horizon.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quotation {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub quotation_number: String,
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
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

/// Input for creating or fully replacing a quotation.
#[derive(Debug, Clone)]
pub struct CreateQuotation {
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub status: QuotationStatus,
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
    fn quotation_status_domain_is_disjoint_from_invoice_terms() {
        assert!(QuotationStatus::parse("accepted").is_some());
        assert!(QuotationStatus::parse("paid").is_none());
        assert!(QuotationStatus::parse("overdue").is_none());
    }
}
