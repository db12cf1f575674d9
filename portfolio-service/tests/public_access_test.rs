//! Public share-link gateway integration tests.

mod common;

use common::{client_payload, invoice_payload, TestApp};

async fn create_client(app: &TestApp, name: &str) -> String {
    let created: serde_json::Value = app
        .client
        .post(app.url("/api/clients"))
        .json(&client_payload(name))
        .send()
        .await
        .expect("Failed to create client")
        .json()
        .await
        .expect("Invalid body");
    created["id"].as_str().expect("Missing id").to_string()
}

async fn create_invoice(app: &TestApp, client_id: &str) -> serde_json::Value {
    app.client
        .post(app.url("/api/invoices"))
        .json(&invoice_payload(client_id))
        .send()
        .await
        .expect("Failed to create invoice")
        .json()
        .await
        .expect("Invalid body")
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn token_resolves_without_a_session() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Shared Client").await;
    let invoice = create_invoice(&app, &client_id).await;
    let token = invoice["token"].as_str().unwrap();

    // A fresh client with no cookies at all.
    let anonymous = app.anonymous_client();
    let response = anonymous
        .get(app.url(&format!("/api/public/invoices/{}", token)))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Invalid body");
    assert_eq!(body["invoice"]["invoice_number"], "INV-0001");
    assert_eq!(body["invoice"]["client"]["name"], "Shared Client");
    // Money fields are plain JSON numbers, dates ISO-8601 strings.
    assert!(body["invoice"]["total"].is_number());
    assert_eq!(body["invoice"]["issue_date"], "2026-07-01");
    // No settings configured: null, not an error.
    assert!(body["settings"].is_null());

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn settings_ride_along_once_configured() {
    let app = TestApp::spawn().await;
    app.login().await;

    app.client
        .post(app.url("/api/settings"))
        .json(&serde_json::json!({
            "business_name": "Studio North",
            "business_email": "billing@studionorth.example",
            "default_currency": "USD",
            "default_tax_rate": 0,
            "default_payment_terms": "Net 30",
            "invoice_prefix": "INV-",
        }))
        .send()
        .await
        .expect("Failed to save settings");

    let client_id = create_client(&app, "Settings Client").await;
    let invoice = create_invoice(&app, &client_id).await;
    let token = invoice["token"].as_str().unwrap();

    let body: serde_json::Value = app
        .anonymous_client()
        .get(app.url(&format!("/api/public/invoices/{}", token)))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Invalid body");

    assert_eq!(body["settings"]["business_name"], "Studio North");

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn unknown_token_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .anonymous_client()
        .get(app.url(&format!(
            "/api/public/invoices/{}",
            uuid::Uuid::now_v7()
        )))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 404);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn malformed_token_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .anonymous_client()
        .get(app.url("/api/public/invoices/not-a-token"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 400);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn invoice_token_never_resolves_on_the_quotation_endpoint() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Cross Family Client").await;
    let invoice = create_invoice(&app, &client_id).await;
    let token = invoice["token"].as_str().unwrap();

    let response = app
        .anonymous_client()
        .get(app.url(&format!("/api/public/quotations/{}", token)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 404);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn public_views_are_counted() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Counted Client").await;
    let invoice = create_invoice(&app, &client_id).await;
    let token = invoice["token"].as_str().unwrap();
    let id = invoice["id"].as_str().unwrap();

    let anonymous = app.anonymous_client();
    for _ in 0..2 {
        anonymous
            .get(app.url(&format!("/api/public/invoices/{}", token)))
            .send()
            .await
            .expect("Failed to execute request");
    }

    let owner_view: serde_json::Value = app
        .client
        .get(app.url(&format!("/api/invoices?id={}", id)))
        .send()
        .await
        .expect("Failed to get invoice")
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(owner_view["view_count"], 2);

    app.cleanup().await;
}
