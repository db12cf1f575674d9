//! Invoice endpoints.

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

use crate::dtos::documents::{InvoicePayload, InvoiceView};
use crate::handlers::{items_by_document, IdQuery};
use crate::middleware::CurrentOwner;
use crate::models::{Client, Invoice, InvoiceSettings, LineItem};
use crate::services::metrics::DOCUMENTS_CREATED_TOTAL;
use crate::services::numbering;
use crate::utils::ValidatedJson;
use crate::AppState;
use service_core::error::AppError;

pub(crate) fn assemble_invoice_views(
    invoices: Vec<Invoice>,
    items: Vec<LineItem>,
    clients: &[Client],
) -> Vec<InvoiceView> {
    let mut items_map = items_by_document(items);
    let client_map: HashMap<Uuid, &Client> = clients.iter().map(|c| (c.id, c)).collect();

    invoices
        .into_iter()
        .map(|invoice| {
            let items = items_map.remove(&invoice.id).unwrap_or_default();
            let client = client_map.get(&invoice.client_id).map(|c| (*c).clone());
            InvoiceView::from_parts(invoice, items, client)
        })
        .collect()
}

/// `GET /api/invoices` lists with items and clients expanded;
/// `GET /api/invoices?id=` fetches one.
pub async fn get_invoices(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    match query.id {
        Some(id) => {
            let invoice = state
                .db
                .get_invoice(owner_id, id)
                .await?
                .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;
            let items = state.db.get_invoice_items(owner_id, id).await?;
            let client = state.db.get_client(owner_id, invoice.client_id).await?;
            Ok(Json(InvoiceView::from_parts(invoice, items, client)).into_response())
        }
        None => {
            let invoices = state.db.list_invoices(owner_id).await?;
            let items = state.db.list_invoice_items_for_owner(owner_id).await?;
            let clients = state.db.list_clients(owner_id).await?;
            Ok(Json(assemble_invoice_views(invoices, items, &clients)).into_response())
        }
    }
}

/// Create an invoice, or fully replace one when the payload id matches an
/// owned row. Creation stamps a sequence number and share token exactly
/// once; updates never renumber or re-token.
pub async fn upsert_invoice(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<InvoicePayload>,
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

    if let Some(id) = id {
        if let Some(invoice) = state.db.update_invoice(owner_id, id, &input).await? {
            let items = state.db.get_invoice_items(owner_id, id).await?;
            let client = state.db.get_client(owner_id, invoice.client_id).await?;
            return Ok(
                (StatusCode::OK, Json(InvoiceView::from_parts(invoice, items, client)))
                    .into_response(),
            );
        }
        // Unknown id: fall through and create a fresh invoice.
    }

    let number = numbering::next_document_number(state.db.pool(), owner_id).await?;
    let invoice = state.db.create_invoice(owner_id, &number, &input).await?;
    DOCUMENTS_CREATED_TOTAL.with_label_values(&["invoice"]).inc();

    let items = state.db.get_invoice_items(owner_id, invoice.id).await?;
    let client = state.db.get_client(owner_id, invoice.client_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(InvoiceView::from_parts(invoice, items, client)),
    )
        .into_response())
}

/// Delete an invoice and its line items.
pub async fn delete_invoice(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("id is required")))?;

    if state.db.delete_invoice(owner_id, id).await? {
        Ok(Json(json!({ "deleted": true })))
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Invoice not found")))
    }
}
