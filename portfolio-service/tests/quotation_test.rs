//! Quotation integration tests.

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

fn quotation_payload(client_id: &str) -> serde_json::Value {
    serde_json::json!({
        "client_id": client_id,
        "issue_date": "2026-07-01",
        "valid_until": "2026-07-31",
        "items": [{ "description": "Scoping", "quantity": 4, "rate": 75 }],
        "tax_rate": 10,
    })
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn quotation_carries_validity_and_computed_totals() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Quoted Client").await;

    let response = app
        .client
        .post(app.url("/api/quotations"))
        .json(&quotation_payload(&client_id))
        .send()
        .await
        .expect("Failed to create quotation");
    assert_eq!(response.status(), 201);

    let quotation: serde_json::Value = response.json().await.expect("Invalid body");
    assert_eq!(quotation["valid_until"], "2026-07-31");
    assert_eq!(quotation["subtotal"], 300.0);
    assert_eq!(quotation["tax_amount"], 30.0);
    assert_eq!(quotation["total"], 330.0);
    assert!(quotation["token"].is_string());

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn invoice_statuses_are_not_valid_for_quotations() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Strict Client").await;
    let mut payload = quotation_payload(&client_id);
    payload["status"] = serde_json::json!("paid");

    let response = app
        .client
        .post(app.url("/api/quotations"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let mut payload = quotation_payload(&client_id);
    payload["status"] = serde_json::json!("accepted");
    let response = app
        .client
        .post(app.url("/api/quotations"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    app.cleanup().await;
}
