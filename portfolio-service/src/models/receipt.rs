//! Receipt model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{DiscountType, NewLineItem};

/// Payment receipt. Status-free: a receipt records a payment that already
/// happened.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Receipt {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub receipt_number: String,
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub related_invoice_number: Option<String>,
    pub amount_paid: Decimal,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub discount: Decimal,
    pub discount_type: String,
    pub total: Decimal,
    pub notes: Option<String>,
    pub currency: String,
    pub token: Option<Uuid>,
    pub view_count: i64,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Input for creating or fully replacing a receipt.
#[derive(Debug, Clone)]
pub struct CreateReceipt {
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub related_invoice_number: Option<String>,
    pub amount_paid: Decimal,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub discount: Decimal,
    pub discount_type: DiscountType,
    pub total: Decimal,
    pub notes: Option<String>,
    pub currency: String,
    pub items: Vec<NewLineItem>,
}
