//! Contract model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Contract status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    Sent,
    Signed,
    Completed,
    Cancelled,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "draft",
            ContractStatus::Sent => "sent",
            ContractStatus::Signed => "signed",
            ContractStatus::Completed => "completed",
            ContractStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ContractStatus::Draft),
            "sent" => Some(ContractStatus::Sent),
            "signed" => Some(ContractStatus::Signed),
            "completed" => Some(ContractStatus::Completed),
            "cancelled" => Some(ContractStatus::Cancelled),
            _ => None,
        }
    }
}

/// How a signature was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    Drawn,
    Typed,
}

impl SignatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureKind::Drawn => "drawn",
            SignatureKind::Typed => "typed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "drawn" => Some(SignatureKind::Drawn),
            "typed" => Some(SignatureKind::Typed),
            _ => None,
        }
    }
}

/// Contract document. Holds generated rich content instead of line items,
/// and numbers from its own per-owner sequence.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub contract_number: String,
    pub template_type: String,
    pub template_name: String,
    pub client_id: Uuid,
    pub project_name: String,
    pub project_scope: String,
    pub deliverables: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub signature_date: Option<NaiveDate>,
    pub project_fee: Decimal,
    pub payment_terms: String,
    pub currency: String,
    pub client_signature: Option<String>,
    pub client_signature_type: Option<String>,
    pub business_signature: Option<String>,
    pub business_signature_type: Option<String>,
    pub status: String,
    pub generated_content: String,
    pub notes: Option<String>,
    pub token: Option<Uuid>,
    pub view_count: i64,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Input for creating or fully replacing a contract.
#[derive(Debug, Clone)]
pub struct CreateContract {
    pub template_type: String,
    pub template_name: String,
    pub client_id: Uuid,
    pub project_name: String,
    pub project_scope: String,
    pub deliverables: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub signature_date: Option<NaiveDate>,
    pub project_fee: Decimal,
    pub payment_terms: String,
    pub currency: String,
    pub client_signature: Option<String>,
    pub client_signature_type: Option<SignatureKind>,
    pub business_signature: Option<String>,
    pub business_signature_type: Option<SignatureKind>,
    pub status: ContractStatus,
    pub generated_content: String,
    pub notes: Option<String>,
}
