//! Invoice CRUD integration tests.

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

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn create_invoice_stamps_number_token_and_totals() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Invoice Client").await;

    let response = app
        .client
        .post(app.url("/api/invoices"))
        .json(&serde_json::json!({
            "client_id": client_id,
            "issue_date": "2026-07-01",
            "due_date": "2026-07-31",
            "items": [
                { "description": "Design", "quantity": 1, "rate": 100 }
            ],
            "tax_rate": 10,
        }))
        .send()
        .await
        .expect("Failed to create invoice");
    assert_eq!(response.status(), 201);

    let invoice: serde_json::Value = response.json().await.expect("Invalid body");
    assert_eq!(invoice["invoice_number"], "INV-0001");
    assert_eq!(invoice["status"], "draft");
    assert_eq!(invoice["subtotal"], 100.0);
    assert_eq!(invoice["tax_amount"], 10.0);
    assert_eq!(invoice["total"], 110.0);
    assert_eq!(invoice["items"][0]["amount"], 100.0);
    assert_eq!(invoice["client"]["name"], "Invoice Client");

    let token = invoice["token"].as_str().expect("Missing token");
    assert!(uuid::Uuid::parse_str(token).is_ok());

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn fixed_discount_example_totals() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Discount Client").await;

    let invoice: serde_json::Value = app
        .client
        .post(app.url("/api/invoices"))
        .json(&serde_json::json!({
            "client_id": client_id,
            "issue_date": "2026-07-01",
            "due_date": "2026-07-31",
            "items": [
                { "description": "Build", "quantity": 2, "rate": 100 }
            ],
            "discount": 20,
            "discount_type": "fixed",
            "tax_rate": 0,
        }))
        .send()
        .await
        .expect("Failed to create invoice")
        .json()
        .await
        .expect("Invalid body");

    assert_eq!(invoice["subtotal"], 200.0);
    assert_eq!(invoice["total"], 180.0);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn update_recomputes_totals_but_keeps_number_and_token() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Update Client").await;

    let created: serde_json::Value = app
        .client
        .post(app.url("/api/invoices"))
        .json(&invoice_payload(&client_id))
        .send()
        .await
        .expect("Failed to create invoice")
        .json()
        .await
        .expect("Invalid body");
    let id = created["id"].as_str().unwrap().to_string();
    let number = created["invoice_number"].clone();
    let token = created["token"].clone();

    let updated: serde_json::Value = app
        .client
        .post(app.url("/api/invoices"))
        .json(&serde_json::json!({
            "id": id,
            "client_id": client_id,
            "issue_date": "2026-07-01",
            "due_date": "2026-08-15",
            "status": "sent",
            "items": [
                { "description": "Design", "quantity": 3, "rate": 50 },
                { "description": "Review", "quantity": 1, "rate": 25 }
            ],
        }))
        .send()
        .await
        .expect("Failed to update invoice")
        .json()
        .await
        .expect("Invalid body");

    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["invoice_number"], number);
    assert_eq!(updated["token"], token);
    assert_eq!(updated["status"], "sent");
    assert_eq!(updated["subtotal"], 175.0);
    assert_eq!(updated["items"].as_array().unwrap().len(), 2);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn unknown_client_is_rejected() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .client
        .post(app.url("/api/invoices"))
        .json(&invoice_payload("99999999-9999-9999-9999-999999999999"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn invalid_status_is_rejected() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Status Client").await;
    let mut payload = invoice_payload(&client_id);
    payload["status"] = serde_json::json!("finalized");

    let response = app
        .client
        .post(app.url("/api/invoices"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn delete_removes_invoice_and_items() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Delete Client").await;
    let created: serde_json::Value = app
        .client
        .post(app.url("/api/invoices"))
        .json(&invoice_payload(&client_id))
        .send()
        .await
        .expect("Failed to create invoice")
        .json()
        .await
        .expect("Invalid body");
    let id = created["id"].as_str().unwrap();

    let response = app
        .client
        .delete(app.url(&format!("/api/invoices?id={}", id)))
        .send()
        .await
        .expect("Failed to delete invoice");
    assert!(response.status().is_success());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoice_items")
        .fetch_one(app.db.pool())
        .await
        .expect("Failed to count items");
    assert_eq!(count, 0);

    app.cleanup().await;
}
