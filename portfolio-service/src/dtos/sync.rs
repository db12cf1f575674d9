//! Sync/export response shape.

use serde::Serialize;

use crate::dtos::documents::{ContractView, InvoiceView, QuotationView, ReceiptView};
use crate::dtos::settings::SettingsView;
use crate::dtos::time_entries::TimeEntryView;
use crate::models::{Client, Resume};

/// One owner's full materialized graph. Empty families serialize as empty
/// arrays; `settings` is null until the owner configures it.
#[derive(Debug, Serialize)]
pub struct SyncDownload {
    pub clients: Vec<Client>,
    pub invoices: Vec<InvoiceView>,
    pub quotations: Vec<QuotationView>,
    pub receipts: Vec<ReceiptView>,
    pub contracts: Vec<ContractView>,
    pub settings: Option<SettingsView>,
    pub resumes: Vec<Resume>,
    pub time_entries: Vec<TimeEntryView>,
}
