//! Domain models for the portfolio backend.

mod client;
mod contract;
mod invoice;
mod line_item;
mod quotation;
mod receipt;
mod resume;
mod settings;
mod time_entry;
mod user;

pub use client::{Client, UpsertClient};
pub use contract::{Contract, ContractStatus, CreateContract, SignatureKind};
pub use invoice::{CreateInvoice, DiscountType, Invoice, InvoiceStatus};
pub use line_item::{LineItem, NewLineItem};
pub use quotation::{CreateQuotation, Quotation, QuotationStatus};
pub use receipt::{CreateReceipt, Receipt};
pub use resume::{Resume, UpsertResume};
pub use settings::{InvoiceSettings, UpsertSettings};
pub use time_entry::{TimeEntry, UpsertTimeEntry};
pub use user::User;
