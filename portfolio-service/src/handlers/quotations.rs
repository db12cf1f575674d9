//! Quotation endpoints.

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

use crate::dtos::documents::{QuotationPayload, QuotationView};
use crate::handlers::{items_by_document, IdQuery};
use crate::middleware::CurrentOwner;
use crate::models::{Client, InvoiceSettings, LineItem, Quotation};
use crate::services::metrics::DOCUMENTS_CREATED_TOTAL;
use crate::services::numbering;
use crate::utils::ValidatedJson;
use crate::AppState;
use service_core::error::AppError;

pub(crate) fn assemble_quotation_views(
    quotations: Vec<Quotation>,
    items: Vec<LineItem>,
    clients: &[Client],
) -> Vec<QuotationView> {
    let mut items_map = items_by_document(items);
    let client_map: HashMap<Uuid, &Client> = clients.iter().map(|c| (c.id, c)).collect();

    quotations
        .into_iter()
        .map(|quotation| {
            let items = items_map.remove(&quotation.id).unwrap_or_default();
            let client = client_map.get(&quotation.client_id).map(|c| (*c).clone());
            QuotationView::from_parts(quotation, items, client)
        })
        .collect()
}

/// `GET /api/quotations` lists; `GET /api/quotations?id=` fetches one.
pub async fn get_quotations(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    match query.id {
        Some(id) => {
            let quotation = state
                .db
                .get_quotation(owner_id, id)
                .await?
                .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quotation not found")))?;
            let items = state.db.get_quotation_items(owner_id, id).await?;
            let client = state.db.get_client(owner_id, quotation.client_id).await?;
            Ok(Json(QuotationView::from_parts(quotation, items, client)).into_response())
        }
        None => {
            let quotations = state.db.list_quotations(owner_id).await?;
            let items = state.db.list_quotation_items_for_owner(owner_id).await?;
            let clients = state.db.list_clients(owner_id).await?;
            Ok(Json(assemble_quotation_views(quotations, items, &clients)).into_response())
        }
    }
}

/// Create a quotation, or fully replace one when the payload id matches an
/// owned row. Quotations draw numbers from the same counter and prefix as
/// invoices.
pub async fn upsert_quotation(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<QuotationPayload>,
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
        if let Some(quotation) = state.db.update_quotation(owner_id, id, &input).await? {
            let items = state.db.get_quotation_items(owner_id, id).await?;
            let client = state.db.get_client(owner_id, quotation.client_id).await?;
            return Ok((
                StatusCode::OK,
                Json(QuotationView::from_parts(quotation, items, client)),
            )
                .into_response());
        }
    }

    let number = numbering::next_document_number(state.db.pool(), owner_id).await?;
    let quotation = state.db.create_quotation(owner_id, &number, &input).await?;
    DOCUMENTS_CREATED_TOTAL
        .with_label_values(&["quotation"])
        .inc();

    let items = state.db.get_quotation_items(owner_id, quotation.id).await?;
    let client = state.db.get_client(owner_id, quotation.client_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(QuotationView::from_parts(quotation, items, client)),
    )
        .into_response())
}

/// Delete a quotation and its line items.
pub async fn delete_quotation(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("id is required")))?;

    if state.db.delete_quotation(owner_id, id).await? {
        Ok(Json(json!({ "deleted": true })))
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Quotation not found")))
    }
}
