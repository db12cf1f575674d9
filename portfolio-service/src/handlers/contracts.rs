//! Contract endpoints.

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

use crate::dtos::documents::{ContractPayload, ContractView};
use crate::handlers::IdQuery;
use crate::middleware::CurrentOwner;
use crate::models::{Client, Contract, InvoiceSettings};
use crate::services::metrics::DOCUMENTS_CREATED_TOTAL;
use crate::services::numbering;
use crate::utils::ValidatedJson;
use crate::AppState;
use service_core::error::AppError;

pub(crate) fn assemble_contract_views(
    contracts: Vec<Contract>,
    clients: &[Client],
) -> Vec<ContractView> {
    let client_map: HashMap<Uuid, &Client> = clients.iter().map(|c| (c.id, c)).collect();

    contracts
        .into_iter()
        .map(|contract| {
            let client = client_map.get(&contract.client_id).map(|c| (*c).clone());
            ContractView::from_parts(contract, client)
        })
        .collect()
}

/// `GET /api/contracts` lists; `GET /api/contracts?id=` fetches one.
pub async fn get_contracts(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    match query.id {
        Some(id) => {
            let contract = state
                .db
                .get_contract(owner_id, id)
                .await?
                .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Contract not found")))?;
            let client = state.db.get_client(owner_id, contract.client_id).await?;
            Ok(Json(ContractView::from_parts(contract, client)).into_response())
        }
        None => {
            let contracts = state.db.list_contracts(owner_id).await?;
            let clients = state.db.list_clients(owner_id).await?;
            Ok(Json(assemble_contract_views(contracts, &clients)).into_response())
        }
    }
}

/// Create a contract, or fully replace one when the payload id matches an
/// owned row. Contract numbers come from their own per-owner counter.
pub async fn upsert_contract(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<ContractPayload>,
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
        if let Some(contract) = state.db.update_contract(owner_id, id, &input).await? {
            let client = state.db.get_client(owner_id, contract.client_id).await?;
            return Ok((StatusCode::OK, Json(ContractView::from_parts(contract, client)))
                .into_response());
        }
    }

    let number = numbering::next_contract_number(state.db.pool(), owner_id).await?;
    let contract = state.db.create_contract(owner_id, &number, &input).await?;
    DOCUMENTS_CREATED_TOTAL
        .with_label_values(&["contract"])
        .inc();

    let client = state.db.get_client(owner_id, contract.client_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ContractView::from_parts(contract, client)),
    )
        .into_response())
}

/// Delete a contract.
pub async fn delete_contract(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("id is required")))?;

    if state.db.delete_contract(owner_id, id).await? {
        Ok(Json(json!({ "deleted": true })))
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Contract not found")))
    }
}
