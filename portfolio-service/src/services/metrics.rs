//! Prometheus metrics for the portfolio backend.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "portfolio_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Documents created, by family.
pub static DOCUMENTS_CREATED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "portfolio_documents_created_total",
        "Total number of documents created",
        &["document_type"] // invoice, quotation, receipt, contract
    )
    .expect("Failed to register documents_created_total")
});

/// Public share-link resolutions, by family.
pub static PUBLIC_VIEWS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "portfolio_public_views_total",
        "Total number of public document views",
        &["document_type"]
    )
    .expect("Failed to register public_views_total")
});

/// Contact messages accepted for delivery.
pub static CONTACT_MESSAGES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "portfolio_contact_messages_total",
        "Total number of contact messages by outcome",
        &["outcome"] // sent, failed
    )
    .expect("Failed to register contact_messages_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&DOCUMENTS_CREATED_TOTAL);
    Lazy::force(&PUBLIC_VIEWS_TOTAL);
    Lazy::force(&CONTACT_MESSAGES_TOTAL);
    Lazy::force(&service_core::middleware::metrics::HTTP_REQUESTS_TOTAL);
    Lazy::force(&service_core::middleware::metrics::HTTP_REQUEST_DURATION);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
