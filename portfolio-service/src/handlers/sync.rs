//! Full data export for client-side caching or backup.

use axum::{
    extract::{Extension, State},
    Json,
};

use crate::dtos::settings::SettingsView;
use crate::dtos::sync::SyncDownload;
use crate::dtos::time_entries::TimeEntryView;
use crate::handlers::{
    contracts::assemble_contract_views, invoices::assemble_invoice_views,
    quotations::assemble_quotation_views, receipts::assemble_receipt_views,
};
use crate::middleware::CurrentOwner;
use crate::AppState;
use service_core::error::AppError;

/// Return the owner's full graph in one response. The per-family fetches
/// are independent, so they run concurrently; an empty family is an empty
/// array, never an error.
pub async fn download(
    State(state): State<AppState>,
    Extension(CurrentOwner(owner_id)): Extension<CurrentOwner>,
) -> Result<Json<SyncDownload>, AppError> {
    let db = &state.db;

    let (
        clients,
        invoices,
        invoice_items,
        quotations,
        quotation_items,
        receipts,
        receipt_items,
        contracts,
        settings,
        resumes,
        time_entries,
    ) = tokio::try_join!(
        db.list_clients(owner_id),
        db.list_invoices(owner_id),
        db.list_invoice_items_for_owner(owner_id),
        db.list_quotations(owner_id),
        db.list_quotation_items_for_owner(owner_id),
        db.list_receipts(owner_id),
        db.list_receipt_items_for_owner(owner_id),
        db.list_contracts(owner_id),
        db.get_settings(owner_id),
        db.list_resumes(owner_id),
        db.list_time_entries(owner_id),
    )?;

    let download = SyncDownload {
        invoices: assemble_invoice_views(invoices, invoice_items, &clients),
        quotations: assemble_quotation_views(quotations, quotation_items, &clients),
        receipts: assemble_receipt_views(receipts, receipt_items, &clients),
        contracts: assemble_contract_views(contracts, &clients),
        settings: settings.map(SettingsView::from),
        resumes,
        time_entries: time_entries.into_iter().map(TimeEntryView::from).collect(),
        clients,
    };

    Ok(Json(download))
}
