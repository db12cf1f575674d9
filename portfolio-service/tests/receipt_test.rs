//! Receipt integration tests.

mod common;

use common::{client_payload, TestApp};

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

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn receipt_records_payment_details() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Paying Client").await;

    let response = app
        .client
        .post(app.url("/api/receipts"))
        .json(&serde_json::json!({
            "client_id": client_id,
            "issue_date": "2026-07-01",
            "payment_date": "2026-07-02",
            "payment_method": "bank_transfer",
            "related_invoice_number": "INV-0042",
            "amount_paid": 110,
            "items": [{ "description": "Design", "quantity": 1, "rate": 100 }],
            "tax_rate": 10,
        }))
        .send()
        .await
        .expect("Failed to create receipt");
    assert_eq!(response.status(), 201);

    let receipt: serde_json::Value = response.json().await.expect("Invalid body");
    assert_eq!(receipt["payment_method"], "bank_transfer");
    assert_eq!(receipt["related_invoice_number"], "INV-0042");
    assert_eq!(receipt["amount_paid"], 110.0);
    assert_eq!(receipt["total"], 110.0);
    assert!(receipt["token"].is_string());
    // Receipts are status-free.
    assert!(receipt.get("status").is_none());

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn overpayment_is_accepted_under_the_default_policy() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Generous Client").await;

    let response = app
        .client
        .post(app.url("/api/receipts"))
        .json(&serde_json::json!({
            "client_id": client_id,
            "issue_date": "2026-07-01",
            "payment_date": "2026-07-02",
            "payment_method": "cash",
            "amount_paid": 500,
            "items": [{ "description": "Small job", "quantity": 1, "rate": 50 }],
        }))
        .send()
        .await
        .expect("Failed to create receipt");

    // Default policy: flagged in logs, not rejected.
    assert_eq!(response.status(), 201);
    let receipt: serde_json::Value = response.json().await.expect("Invalid body");
    assert_eq!(receipt["amount_paid"], 500.0);
    assert_eq!(receipt["total"], 50.0);

    app.cleanup().await;
}
