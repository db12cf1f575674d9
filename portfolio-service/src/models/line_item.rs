//! Line item shared by invoices, quotations and receipts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One billable row on a document. `amount` is always `quantity * rate`,
/// recomputed server-side; client-supplied amounts are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LineItem {
    pub id: Uuid,
    pub document_id: Uuid,
    pub owner_id: Uuid,
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub sort_order: i32,
}

/// A computed line item ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}
