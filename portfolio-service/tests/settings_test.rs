//! Invoice settings integration tests.

mod common;

use common::TestApp;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn unset_settings_return_documented_defaults_without_creating_a_row() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .client
        .get(app.url("/api/settings"))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Invalid body");
    assert_eq!(body["default_currency"], "USD");
    assert_eq!(body["invoice_prefix"], "INV-");
    assert_eq!(body["next_invoice_number"], 1);

    // Reading defaults must not have created a row.
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoice_settings")
        .fetch_one(app.db.pool())
        .await
        .expect("Failed to count settings rows");
    assert_eq!(count, 0);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn upserted_settings_are_returned_on_read() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .client
        .post(app.url("/api/settings"))
        .json(&serde_json::json!({
            "business_name": "Studio North",
            "business_email": "billing@studionorth.example",
            "default_currency": "EUR",
            "default_tax_rate": 23,
            "default_payment_terms": "Net 15",
            "invoice_prefix": "SN-",
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let body: serde_json::Value = app
        .client
        .get(app.url("/api/settings"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Invalid body");

    assert_eq!(body["business_name"], "Studio North");
    assert_eq!(body["default_currency"], "EUR");
    assert_eq!(body["invoice_prefix"], "SN-");
    assert_eq!(body["default_tax_rate"], 23.0);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn invalid_settings_payload_is_a_validation_error() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .client
        .post(app.url("/api/settings"))
        .json(&serde_json::json!({
            "business_name": "",
            "business_email": "not-an-email",
            "default_currency": "EURO",
            "default_tax_rate": 0,
            "default_payment_terms": "Net 15",
            "invoice_prefix": "SN-",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);

    app.cleanup().await;
}
