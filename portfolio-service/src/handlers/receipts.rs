//! Receipt endpoints.

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

use crate::dtos::documents::{ReceiptPayload, ReceiptView};
use crate::handlers::{items_by_document, IdQuery};
use crate::middleware::CurrentOwner;
use crate::models::{Client, CreateReceipt, InvoiceSettings, LineItem, Receipt};
use crate::services::metrics::DOCUMENTS_CREATED_TOTAL;
use crate::services::numbering;
use crate::utils::ValidatedJson;
use crate::AppState;
use service_core::error::AppError;

pub(crate) fn assemble_receipt_views(
    receipts: Vec<Receipt>,
    items: Vec<LineItem>,
    clients: &[Client],
) -> Vec<ReceiptView> {
    let mut items_map = items_by_document(items);
    let client_map: HashMap<Uuid, &Client> = clients.iter().map(|c| (c.id, c)).collect();

    receipts
        .into_iter()
        .map(|receipt| {
            let items = items_map.remove(&receipt.id).unwrap_or_default();
            let client = client_map.get(&receipt.client_id).map(|c| (*c).clone());
            ReceiptView::from_parts(receipt, items, client)
        })
        .collect()
}

/// Overpayment is a configurable rule: rejected when the policy says so,
/// otherwise logged and accepted.
fn check_overpayment(state: &AppState, input: &CreateReceipt) -> Result<(), AppError> {
    if input.amount_paid <= input.total {
        return Ok(());
    }
    if state.config.billing.reject_overpayment {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Amount paid {} exceeds receipt total {}",
            input.amount_paid,
            input.total
        )));
    }
    warn!(
        amount_paid = %input.amount_paid,
        total = %input.total,
        "Receipt amount paid exceeds total"
    );
    Ok(())
}

/// `GET /api/receipts` lists; `GET /api/receipts?id=` fetches one.
pub async fn get_receipts(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    match query.id {
        Some(id) => {
            let receipt = state
                .db
                .get_receipt(owner_id, id)
                .await?
                .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Receipt not found")))?;
            let items = state.db.get_receipt_items(owner_id, id).await?;
            let client = state.db.get_client(owner_id, receipt.client_id).await?;
            Ok(Json(ReceiptView::from_parts(receipt, items, client)).into_response())
        }
        None => {
            let receipts = state.db.list_receipts(owner_id).await?;
            let items = state.db.list_receipt_items_for_owner(owner_id).await?;
            let clients = state.db.list_clients(owner_id).await?;
            Ok(Json(assemble_receipt_views(receipts, items, &clients)).into_response())
        }
    }
}

/// Create a receipt, or fully replace one when the payload id matches an
/// owned row. Receipts draw numbers from the same counter and prefix as
/// invoices.
pub async fn upsert_receipt(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<ReceiptPayload>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state
        .db
        .get_settings(owner_id)
        .await?
        .unwrap_or_else(|| InvoiceSettings::defaulted(owner_id));

    let id = payload.id;
    let input = payload.into_create(&settings)?;

    if state
        .db
        .get_client(owner_id, input.client_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(anyhow::anyhow!("Unknown client")));
    }

    check_overpayment(&state, &input)?;

    if let Some(id) = id {
        if let Some(receipt) = state.db.update_receipt(owner_id, id, &input).await? {
            let items = state.db.get_receipt_items(owner_id, id).await?;
            let client = state.db.get_client(owner_id, receipt.client_id).await?;
            return Ok((
                StatusCode::OK,
                Json(ReceiptView::from_parts(receipt, items, client)),
            )
                .into_response());
        }
    }

    let number = numbering::next_document_number(state.db.pool(), owner_id).await?;
    let receipt = state.db.create_receipt(owner_id, &number, &input).await?;
    DOCUMENTS_CREATED_TOTAL
        .with_label_values(&["receipt"])
        .inc();

    let items = state.db.get_receipt_items(owner_id, receipt.id).await?;
    let client = state.db.get_client(owner_id, receipt.client_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReceiptView::from_parts(receipt, items, client)),
    )
        .into_response())
}

/// Delete a receipt and its line items.
pub async fn delete_receipt(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("id is required")))?;

    if state.db.delete_receipt(owner_id, id).await? {
        Ok(Json(json!({ "deleted": true })))
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Receipt not found")))
    }
}
