//! Document payloads and response views.
//!
//! Payloads carry only what the caller is trusted with; statuses are parsed
//! against each family's domain and every money field is recomputed through
//! the shared totals engine before anything is persisted. Views render money
//! as plain JSON numbers and expand the client inline.

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::{validate_non_negative, validate_positive};
use crate::models::{
    Client, Contract, ContractStatus, CreateContract, CreateInvoice, CreateQuotation,
    CreateReceipt, DiscountType, Invoice, InvoiceSettings, InvoiceStatus, LineItem, Quotation,
    QuotationStatus, Receipt, SignatureKind,
};
use crate::services::totals::{self, ItemInput};

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LineItemPayload {
    #[validate(length(min = 1, max = 500, message = "description is required"))]
    pub description: String,
    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,
    #[validate(custom(function = "validate_non_negative"))]
    pub rate: Decimal,
}

impl LineItemPayload {
    fn to_item_input(&self) -> ItemInput {
        ItemInput {
            description: self.description.clone(),
            quantity: self.quantity,
            rate: self.rate,
        }
    }
}

fn item_inputs(items: &[LineItemPayload]) -> Vec<ItemInput> {
    items.iter().map(LineItemPayload::to_item_input).collect()
}

fn parse_discount_type(value: Option<&str>) -> Result<DiscountType, AppError> {
    match value {
        None => Ok(DiscountType::Percentage),
        Some(s) => DiscountType::parse(s)
            .ok_or_else(|| AppError::BadRequest(anyhow!("Unknown discount type '{}'", s))),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct InvoicePayload {
    pub id: Option<Uuid>,
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: Option<String>,
    #[validate(nested, length(min = 1, message = "at least one line item is required"))]
    pub items: Vec<LineItemPayload>,
    #[validate(custom(function = "validate_non_negative"))]
    pub discount: Option<Decimal>,
    pub discount_type: Option<String>,
    #[validate(custom(function = "validate_non_negative"))]
    pub tax_rate: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(length(max = 2000))]
    pub terms: Option<String>,
    #[validate(length(min = 3, max = 3))]
    pub currency: Option<String>,
}

impl InvoicePayload {
    /// Resolve defaults from the owner's settings, parse the status domain
    /// and recompute every money field.
    pub fn into_create(self, defaults: &InvoiceSettings) -> Result<CreateInvoice, AppError> {
        let status = match self.status.as_deref() {
            None => InvoiceStatus::Draft,
            Some(s) => InvoiceStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(anyhow!("Unknown invoice status '{}'", s)))?,
        };
        let discount_type = parse_discount_type(self.discount_type.as_deref())?;
        let discount = self.discount.unwrap_or(Decimal::ZERO);
        let tax_rate = self.tax_rate.unwrap_or(defaults.default_tax_rate);
        let computed = totals::compute(&item_inputs(&self.items), discount, discount_type, tax_rate);

        Ok(CreateInvoice {
            client_id: self.client_id,
            issue_date: self.issue_date,
            due_date: self.due_date,
            status,
            subtotal: computed.subtotal,
            tax_rate,
            tax_amount: computed.tax_amount,
            discount,
            discount_type,
            total: computed.total,
            notes: self.notes,
            terms: self.terms,
            currency: self
                .currency
                .unwrap_or_else(|| defaults.default_currency.clone()),
            items: computed.items,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuotationPayload {
    pub id: Option<Uuid>,
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub status: Option<String>,
    #[validate(nested, length(min = 1, message = "at least one line item is required"))]
    pub items: Vec<LineItemPayload>,
    #[validate(custom(function = "validate_non_negative"))]
    pub discount: Option<Decimal>,
    pub discount_type: Option<String>,
    #[validate(custom(function = "validate_non_negative"))]
    pub tax_rate: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(length(max = 2000))]
    pub terms: Option<String>,
    #[validate(length(min = 3, max = 3))]
    pub currency: Option<String>,
}

impl QuotationPayload {
    pub fn into_create(self, defaults: &InvoiceSettings) -> Result<CreateQuotation, AppError> {
        let status = match self.status.as_deref() {
            None => QuotationStatus::Draft,
            Some(s) => QuotationStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(anyhow!("Unknown quotation status '{}'", s)))?,
        };
        let discount_type = parse_discount_type(self.discount_type.as_deref())?;
        let discount = self.discount.unwrap_or(Decimal::ZERO);
        let tax_rate = self.tax_rate.unwrap_or(defaults.default_tax_rate);
        let computed = totals::compute(&item_inputs(&self.items), discount, discount_type, tax_rate);

        Ok(CreateQuotation {
            client_id: self.client_id,
            issue_date: self.issue_date,
            valid_until: self.valid_until,
            status,
            subtotal: computed.subtotal,
            tax_rate,
            tax_amount: computed.tax_amount,
            discount,
            discount_type,
            total: computed.total,
            notes: self.notes,
            terms: self.terms,
            currency: self
                .currency
                .unwrap_or_else(|| defaults.default_currency.clone()),
            items: computed.items,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReceiptPayload {
    pub id: Option<Uuid>,
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub payment_date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "payment method is required"))]
    pub payment_method: String,
    #[validate(length(max = 100))]
    pub related_invoice_number: Option<String>,
    #[validate(custom(function = "validate_non_negative"))]
    pub amount_paid: Decimal,
    #[validate(nested, length(min = 1, message = "at least one line item is required"))]
    pub items: Vec<LineItemPayload>,
    #[validate(custom(function = "validate_non_negative"))]
    pub discount: Option<Decimal>,
    pub discount_type: Option<String>,
    #[validate(custom(function = "validate_non_negative"))]
    pub tax_rate: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(length(min = 3, max = 3))]
    pub currency: Option<String>,
}

impl ReceiptPayload {
    pub fn into_create(self, defaults: &InvoiceSettings) -> Result<CreateReceipt, AppError> {
        let discount_type = parse_discount_type(self.discount_type.as_deref())?;
        let discount = self.discount.unwrap_or(Decimal::ZERO);
        let tax_rate = self.tax_rate.unwrap_or(defaults.default_tax_rate);
        let computed = totals::compute(&item_inputs(&self.items), discount, discount_type, tax_rate);

        Ok(CreateReceipt {
            client_id: self.client_id,
            issue_date: self.issue_date,
            payment_date: self.payment_date,
            payment_method: self.payment_method,
            related_invoice_number: self.related_invoice_number,
            amount_paid: self.amount_paid,
            subtotal: computed.subtotal,
            tax_rate,
            tax_amount: computed.tax_amount,
            discount,
            discount_type,
            total: computed.total,
            notes: self.notes,
            currency: self
                .currency
                .unwrap_or_else(|| defaults.default_currency.clone()),
            items: computed.items,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContractPayload {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub template_type: String,
    #[validate(length(min = 1, max = 200))]
    pub template_name: String,
    pub client_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "project name is required"))]
    pub project_name: String,
    #[validate(length(min = 1, max = 5000))]
    pub project_scope: String,
    #[validate(length(min = 1, max = 5000))]
    pub deliverables: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub signature_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_non_negative"))]
    pub project_fee: Decimal,
    #[validate(length(min = 1, max = 200))]
    pub payment_terms: String,
    pub status: Option<String>,
    pub client_signature: Option<String>,
    pub client_signature_type: Option<String>,
    pub business_signature: Option<String>,
    pub business_signature_type: Option<String>,
    #[validate(length(min = 1, message = "generated content is required"))]
    pub generated_content: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(length(min = 3, max = 3))]
    pub currency: Option<String>,
}

impl ContractPayload {
    pub fn into_create(self, defaults: &InvoiceSettings) -> Result<CreateContract, AppError> {
        let status = match self.status.as_deref() {
            None => ContractStatus::Draft,
            Some(s) => ContractStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(anyhow!("Unknown contract status '{}'", s)))?,
        };
        let client_signature_type = parse_signature_kind(self.client_signature_type.as_deref())?;
        let business_signature_type =
            parse_signature_kind(self.business_signature_type.as_deref())?;

        Ok(CreateContract {
            template_type: self.template_type,
            template_name: self.template_name,
            client_id: self.client_id,
            project_name: self.project_name,
            project_scope: self.project_scope,
            deliverables: self.deliverables,
            start_date: self.start_date,
            end_date: self.end_date,
            signature_date: self.signature_date,
            project_fee: self.project_fee,
            payment_terms: self.payment_terms,
            currency: self
                .currency
                .unwrap_or_else(|| defaults.default_currency.clone()),
            client_signature: self.client_signature,
            client_signature_type,
            business_signature: self.business_signature,
            business_signature_type,
            status,
            generated_content: self.generated_content,
            notes: self.notes,
        })
    }
}

fn parse_signature_kind(value: Option<&str>) -> Result<Option<SignatureKind>, AppError> {
    match value {
        None => Ok(None),
        Some(s) => SignatureKind::parse(s)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(anyhow!("Unknown signature type '{}'", s))),
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LineItemView {
    pub id: Uuid,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<LineItem> for LineItemView {
    fn from(item: LineItem) -> Self {
        LineItemView {
            id: item.id,
            description: item.description,
            quantity: item.quantity,
            rate: item.rate,
            amount: item.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceView {
    pub id: Uuid,
    pub invoice_number: String,
    pub client_id: Uuid,
    pub client: Option<Client>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    pub items: Vec<LineItemView>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    pub discount_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub currency: String,
    pub token: Option<Uuid>,
    pub view_count: i64,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl InvoiceView {
    pub fn from_parts(invoice: Invoice, items: Vec<LineItem>, client: Option<Client>) -> Self {
        InvoiceView {
            id: invoice.id,
            invoice_number: invoice.invoice_number,
            client_id: invoice.client_id,
            client,
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            status: invoice.status,
            items: items.into_iter().map(LineItemView::from).collect(),
            subtotal: invoice.subtotal,
            tax_rate: invoice.tax_rate,
            tax_amount: invoice.tax_amount,
            discount: invoice.discount,
            discount_type: invoice.discount_type,
            total: invoice.total,
            notes: invoice.notes,
            terms: invoice.terms,
            currency: invoice.currency,
            token: invoice.token,
            view_count: invoice.view_count,
            created_utc: invoice.created_utc,
            updated_utc: invoice.updated_utc,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuotationView {
    pub id: Uuid,
    pub quotation_number: String,
    pub client_id: Uuid,
    pub client: Option<Client>,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub status: String,
    pub items: Vec<LineItemView>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    pub discount_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub currency: String,
    pub token: Option<Uuid>,
    pub view_count: i64,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl QuotationView {
    pub fn from_parts(quotation: Quotation, items: Vec<LineItem>, client: Option<Client>) -> Self {
        QuotationView {
            id: quotation.id,
            quotation_number: quotation.quotation_number,
            client_id: quotation.client_id,
            client,
            issue_date: quotation.issue_date,
            valid_until: quotation.valid_until,
            status: quotation.status,
            items: items.into_iter().map(LineItemView::from).collect(),
            subtotal: quotation.subtotal,
            tax_rate: quotation.tax_rate,
            tax_amount: quotation.tax_amount,
            discount: quotation.discount,
            discount_type: quotation.discount_type,
            total: quotation.total,
            notes: quotation.notes,
            terms: quotation.terms,
            currency: quotation.currency,
            token: quotation.token,
            view_count: quotation.view_count,
            created_utc: quotation.created_utc,
            updated_utc: quotation.updated_utc,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiptView {
    pub id: Uuid,
    pub receipt_number: String,
    pub client_id: Uuid,
    pub client: Option<Client>,
    pub issue_date: NaiveDate,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub related_invoice_number: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    pub items: Vec<LineItemView>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    pub discount_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub notes: Option<String>,
    pub currency: String,
    pub token: Option<Uuid>,
    pub view_count: i64,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl ReceiptView {
    pub fn from_parts(receipt: Receipt, items: Vec<LineItem>, client: Option<Client>) -> Self {
        ReceiptView {
            id: receipt.id,
            receipt_number: receipt.receipt_number,
            client_id: receipt.client_id,
            client,
            issue_date: receipt.issue_date,
            payment_date: receipt.payment_date,
            payment_method: receipt.payment_method,
            related_invoice_number: receipt.related_invoice_number,
            amount_paid: receipt.amount_paid,
            items: items.into_iter().map(LineItemView::from).collect(),
            subtotal: receipt.subtotal,
            tax_rate: receipt.tax_rate,
            tax_amount: receipt.tax_amount,
            discount: receipt.discount,
            discount_type: receipt.discount_type,
            total: receipt.total,
            notes: receipt.notes,
            currency: receipt.currency,
            token: receipt.token,
            view_count: receipt.view_count,
            created_utc: receipt.created_utc,
            updated_utc: receipt.updated_utc,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractView {
    pub id: Uuid,
    pub contract_number: String,
    pub template_type: String,
    pub template_name: String,
    pub client_id: Uuid,
    pub client: Option<Client>,
    pub project_name: String,
    pub project_scope: String,
    pub deliverables: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub signature_date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::float")]
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

impl ContractView {
    pub fn from_parts(contract: Contract, client: Option<Client>) -> Self {
        ContractView {
            id: contract.id,
            contract_number: contract.contract_number,
            template_type: contract.template_type,
            template_name: contract.template_name,
            client_id: contract.client_id,
            client,
            project_name: contract.project_name,
            project_scope: contract.project_scope,
            deliverables: contract.deliverables,
            start_date: contract.start_date,
            end_date: contract.end_date,
            signature_date: contract.signature_date,
            project_fee: contract.project_fee,
            payment_terms: contract.payment_terms,
            currency: contract.currency,
            client_signature: contract.client_signature,
            client_signature_type: contract.client_signature_type,
            business_signature: contract.business_signature,
            business_signature_type: contract.business_signature_type,
            status: contract.status,
            generated_content: contract.generated_content,
            notes: contract.notes,
            token: contract.token,
            view_count: contract.view_count,
            created_utc: contract.created_utc,
            updated_utc: contract.updated_utc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn payload_items() -> Vec<LineItemPayload> {
        vec![LineItemPayload {
            description: "Design work".to_string(),
            quantity: d("2"),
            rate: d("50"),
        }]
    }

    #[test]
    fn invoice_payload_requires_items() {
        let payload = InvoicePayload {
            id: None,
            client_id: Uuid::new_v4(),
            issue_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
            status: None,
            items: vec![],
            discount: None,
            discount_type: None,
            tax_rate: None,
            notes: None,
            terms: None,
            currency: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn zero_quantity_item_is_rejected() {
        let payload = InvoicePayload {
            id: None,
            client_id: Uuid::new_v4(),
            issue_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
            status: None,
            items: vec![LineItemPayload {
                description: "free".to_string(),
                quantity: Decimal::ZERO,
                rate: d("10"),
            }],
            discount: None,
            discount_type: None,
            tax_rate: None,
            notes: None,
            terms: None,
            currency: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn invoice_inherits_settings_defaults() {
        let defaults = InvoiceSettings::defaulted(Uuid::new_v4());
        let payload = InvoicePayload {
            id: None,
            client_id: Uuid::new_v4(),
            issue_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
            status: None,
            items: payload_items(),
            discount: None,
            discount_type: None,
            tax_rate: None,
            notes: None,
            terms: None,
            currency: None,
        };
        let create = payload.into_create(&defaults).unwrap();
        assert_eq!(create.currency, "USD");
        assert_eq!(create.status, InvoiceStatus::Draft);
        assert_eq!(create.subtotal, d("100"));
        assert_eq!(create.total, d("100"));
    }

    #[test]
    fn unknown_status_is_a_bad_request() {
        let defaults = InvoiceSettings::defaulted(Uuid::new_v4());
        let payload = InvoicePayload {
            id: None,
            client_id: Uuid::new_v4(),
            issue_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
            status: Some("finalized".to_string()),
            items: payload_items(),
            discount: None,
            discount_type: None,
            tax_rate: None,
            notes: None,
            terms: None,
            currency: None,
        };
        assert!(payload.into_create(&defaults).is_err());
    }

    #[test]
    fn client_supplied_amounts_are_ignored() {
        // The payload has no amount field at all; totals come from the
        // engine. 3 x 40 with 10% tax on the discounted base.
        let defaults = InvoiceSettings::defaulted(Uuid::new_v4());
        let payload = InvoicePayload {
            id: None,
            client_id: Uuid::new_v4(),
            issue_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
            status: None,
            items: vec![LineItemPayload {
                description: "dev".to_string(),
                quantity: d("3"),
                rate: d("40"),
            }],
            discount: Some(d("20")),
            discount_type: Some("fixed".to_string()),
            tax_rate: Some(d("10")),
            notes: None,
            terms: None,
            currency: None,
        };
        let create = payload.into_create(&defaults).unwrap();
        assert_eq!(create.items[0].amount, d("120.00"));
        assert_eq!(create.subtotal, d("120.00"));
        assert_eq!(create.tax_amount, d("10.00"));
        assert_eq!(create.total, d("110.00"));
    }

    #[test]
    fn views_serialize_money_as_plain_numbers() {
        let defaults = InvoiceSettings::defaulted(Uuid::new_v4());
        let payload = InvoicePayload {
            id: None,
            client_id: Uuid::new_v4(),
            issue_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
            status: None,
            items: payload_items(),
            discount: None,
            discount_type: None,
            tax_rate: None,
            notes: None,
            terms: None,
            currency: None,
        };
        let create = payload.into_create(&defaults).unwrap();

        let now = Utc::now();
        let invoice = Invoice {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            invoice_number: "INV-0001".to_string(),
            client_id: create.client_id,
            issue_date: create.issue_date,
            due_date: create.due_date,
            status: create.status.as_str().to_string(),
            subtotal: create.subtotal,
            tax_rate: create.tax_rate,
            tax_amount: create.tax_amount,
            discount: create.discount,
            discount_type: create.discount_type.as_str().to_string(),
            total: create.total,
            notes: None,
            terms: None,
            currency: create.currency.clone(),
            token: Some(Uuid::now_v7()),
            view_count: 0,
            created_utc: now,
            updated_utc: now,
        };

        let view = InvoiceView::from_parts(invoice, vec![], None);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["subtotal"].is_number());
        assert!(json["total"].is_number());
        assert!(json["tax_rate"].is_number());
        assert_eq!(json["invoice_number"], "INV-0001");
        // Dates render as ISO-8601 strings.
        assert_eq!(json["issue_date"], "2026-07-01");
    }
}
