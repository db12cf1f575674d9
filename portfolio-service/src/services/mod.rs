//! Service layer: persistence, numbering, totals, email, metrics.

pub mod database;
pub mod email;
pub mod metrics;
pub mod numbering;
pub mod totals;

pub use database::Database;
pub use email::{Mailer, SmtpMailer};
pub use metrics::{get_metrics, init_metrics};
