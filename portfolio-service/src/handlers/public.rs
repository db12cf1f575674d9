//! Public share-link gateway: token-keyed, read-only, no session.
//!
//! Each document family resolves only its own token column, so an invoice
//! token can never surface a quotation. The owner's current settings ride
//! along for rendering; a missing settings row is `null`, not an error.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::dtos::documents::{ContractView, InvoiceView, QuotationView, ReceiptView};
use crate::dtos::settings::SettingsView;
use crate::services::metrics::PUBLIC_VIEWS_TOTAL;
use crate::AppState;
use service_core::error::AppError;

/// Tokens are bearer credentials; blank or malformed ones never reach the
/// database.
fn parse_token(raw: &str) -> Result<Uuid, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("Token required")));
    }
    Uuid::parse_str(trimmed).map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid token")))
}

async fn load_settings(state: &AppState, owner_id: Uuid) -> Result<Option<SettingsView>, AppError> {
    Ok(state.db.get_settings(owner_id).await?.map(SettingsView::from))
}

pub async fn public_invoice(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let token = parse_token(&token)?;

    let invoice = state
        .db
        .get_invoice_by_token(token)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

    if let Err(e) = state.db.increment_invoice_views(invoice.id).await {
        warn!(error = %e, invoice_id = %invoice.id, "Failed to record public view");
    }
    PUBLIC_VIEWS_TOTAL.with_label_values(&["invoice"]).inc();

    let owner_id = invoice.owner_id;
    let items = state.db.get_invoice_items(owner_id, invoice.id).await?;
    let client = state.db.get_client(owner_id, invoice.client_id).await?;
    let settings = load_settings(&state, owner_id).await?;

    Ok(Json(json!({
        "invoice": InvoiceView::from_parts(invoice, items, client),
        "settings": settings,
    })))
}

pub async fn public_quotation(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let token = parse_token(&token)?;

    let quotation = state
        .db
        .get_quotation_by_token(token)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quotation not found")))?;

    if let Err(e) = state.db.increment_quotation_views(quotation.id).await {
        warn!(error = %e, quotation_id = %quotation.id, "Failed to record public view");
    }
    PUBLIC_VIEWS_TOTAL.with_label_values(&["quotation"]).inc();

    let owner_id = quotation.owner_id;
    let items = state.db.get_quotation_items(owner_id, quotation.id).await?;
    let client = state.db.get_client(owner_id, quotation.client_id).await?;
    let settings = load_settings(&state, owner_id).await?;

    Ok(Json(json!({
        "quotation": QuotationView::from_parts(quotation, items, client),
        "settings": settings,
    })))
}

pub async fn public_receipt(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let token = parse_token(&token)?;

    let receipt = state
        .db
        .get_receipt_by_token(token)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Receipt not found")))?;

    if let Err(e) = state.db.increment_receipt_views(receipt.id).await {
        warn!(error = %e, receipt_id = %receipt.id, "Failed to record public view");
    }
    PUBLIC_VIEWS_TOTAL.with_label_values(&["receipt"]).inc();

    let owner_id = receipt.owner_id;
    let items = state.db.get_receipt_items(owner_id, receipt.id).await?;
    let client = state.db.get_client(owner_id, receipt.client_id).await?;
    let settings = load_settings(&state, owner_id).await?;

    Ok(Json(json!({
        "receipt": ReceiptView::from_parts(receipt, items, client),
        "settings": settings,
    })))
}

pub async fn public_contract(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let token = parse_token(&token)?;

    let contract = state
        .db
        .get_contract_by_token(token)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Contract not found")))?;

    if let Err(e) = state.db.increment_contract_views(contract.id).await {
        warn!(error = %e, contract_id = %contract.id, "Failed to record public view");
    }
    PUBLIC_VIEWS_TOTAL.with_label_values(&["contract"]).inc();

    let owner_id = contract.owner_id;
    let client = state.db.get_client(owner_id, contract.client_id).await?;
    let settings = load_settings(&state, owner_id).await?;

    Ok(Json(json!({
        "contract": ContractView::from_parts(contract, client),
        "settings": settings,
    })))
}
