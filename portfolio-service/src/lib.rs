pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::PortfolioConfig;
use crate::handlers::{
    app, auth, clients, contact, contracts, invoices, maintenance, metrics, public, quotations,
    receipts, resumes, settings, sync, time_entries,
};
use crate::middleware::session_auth_middleware;
use crate::services::{Database, Mailer};
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: PortfolioConfig,
    pub db: Arc<Database>,
    pub mailer: Arc<dyn Mailer>,
}

pub fn build_router(state: AppState) -> Router {
    // Session setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.session.secure_cookies)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            state.config.session.idle_hours,
        )));

    // Owner-facing routes behind the session check.
    let protected = Router::new()
        .route(
            "/api/clients",
            get(clients::get_clients)
                .post(clients::upsert_client)
                .delete(clients::delete_client),
        )
        .route(
            "/api/settings",
            get(settings::get_settings).post(settings::upsert_settings),
        )
        .route(
            "/api/invoices",
            get(invoices::get_invoices)
                .post(invoices::upsert_invoice)
                .delete(invoices::delete_invoice),
        )
        .route(
            "/api/quotations",
            get(quotations::get_quotations)
                .post(quotations::upsert_quotation)
                .delete(quotations::delete_quotation),
        )
        .route(
            "/api/receipts",
            get(receipts::get_receipts)
                .post(receipts::upsert_receipt)
                .delete(receipts::delete_receipt),
        )
        .route(
            "/api/contracts",
            get(contracts::get_contracts)
                .post(contracts::upsert_contract)
                .delete(contracts::delete_contract),
        )
        .route(
            "/api/resumes",
            get(resumes::get_resumes)
                .post(resumes::upsert_resume)
                .delete(resumes::delete_resume),
        )
        .route(
            "/api/time-entries",
            get(time_entries::get_time_entries)
                .post(time_entries::upsert_time_entry)
                .delete(time_entries::delete_time_entry),
        )
        .route("/api/sync/download", get(sync::download))
        .route(
            "/api/maintenance/backfill-tokens",
            post(maintenance::backfill_tokens),
        )
        .layer(from_fn(session_auth_middleware));

    Router::new()
        .route("/health", get(app::health_check))
        .route("/metrics", get(metrics::metrics))
        // Public share links: token-keyed, no session.
        .route("/api/public/invoices/:token", get(public::public_invoice))
        .route(
            "/api/public/quotations/:token",
            get(public::public_quotation),
        )
        .route("/api/public/receipts/:token", get(public::public_receipt))
        .route("/api/public/contracts/:token", get(public::public_contract))
        .route("/api/auth/login", post(auth::login).delete(auth::logout))
        .route("/api/contact", post(contact::submit_contact))
        .merge(protected)
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .with_state(state)
}
