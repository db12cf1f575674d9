//! service-core: shared infrastructure for the portfolio backend.

pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
