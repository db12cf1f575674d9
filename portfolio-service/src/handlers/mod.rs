//! HTTP handlers.

pub mod app;
pub mod auth;
pub mod clients;
pub mod contact;
pub mod contracts;
pub mod invoices;
pub mod maintenance;
pub mod metrics;
pub mod public;
pub mod quotations;
pub mod receipts;
pub mod resumes;
pub mod settings;
pub mod sync;
pub mod time_entries;

use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::LineItem;

/// `?id=` selector shared by the list/get/delete endpoint families.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<Uuid>,
}

/// Group a bulk item fetch by owning document for view assembly.
pub(crate) fn items_by_document(items: Vec<LineItem>) -> HashMap<Uuid, Vec<LineItem>> {
    let mut grouped: HashMap<Uuid, Vec<LineItem>> = HashMap::new();
    for item in items {
        grouped.entry(item.document_id).or_default().push(item);
    }
    grouped
}
