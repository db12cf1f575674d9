//! Sequence numbering integration tests.

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
async fn numbers_increment_under_the_owner_prefix() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Sequence Client").await;

    for expected in ["INV-0001", "INV-0002", "INV-0003"] {
        let invoice: serde_json::Value = app
            .client
            .post(app.url("/api/invoices"))
            .json(&invoice_payload(&client_id))
            .send()
            .await
            .expect("Failed to create invoice")
            .json()
            .await
            .expect("Invalid body");
        assert_eq!(invoice["invoice_number"], expected);
    }

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn receipts_and_quotations_share_the_invoice_counter() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Shared Counter Client").await;

    let invoice: serde_json::Value = app
        .client
        .post(app.url("/api/invoices"))
        .json(&invoice_payload(&client_id))
        .send()
        .await
        .expect("Failed to create invoice")
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(invoice["invoice_number"], "INV-0001");

    let quotation: serde_json::Value = app
        .client
        .post(app.url("/api/quotations"))
        .json(&serde_json::json!({
            "client_id": client_id,
            "issue_date": "2026-07-01",
            "valid_until": "2026-07-31",
            "items": [{ "description": "Scope", "quantity": 1, "rate": 10 }],
        }))
        .send()
        .await
        .expect("Failed to create quotation")
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(quotation["quotation_number"], "INV-0002");

    let receipt: serde_json::Value = app
        .client
        .post(app.url("/api/receipts"))
        .json(&serde_json::json!({
            "client_id": client_id,
            "issue_date": "2026-07-01",
            "payment_date": "2026-07-02",
            "payment_method": "bank_transfer",
            "amount_paid": 10,
            "items": [{ "description": "Payment", "quantity": 1, "rate": 10 }],
        }))
        .send()
        .await
        .expect("Failed to create receipt")
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(receipt["receipt_number"], "INV-0003");

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn concurrent_issuances_never_share_a_number() {
    let app = TestApp::spawn().await;
    app.login().await;

    let client_id = create_client(&app, "Concurrent Client").await;

    let create = |_n: usize| {
        let client = app.client.clone();
        let url = app.url("/api/invoices");
        let payload = invoice_payload(&client_id);
        async move {
            let invoice: serde_json::Value = client
                .post(url)
                .json(&payload)
                .send()
                .await
                .expect("Failed to create invoice")
                .json()
                .await
                .expect("Invalid body");
            invoice["invoice_number"].as_str().unwrap().to_string()
        }
    };

    let (a, b, c, d) = tokio::join!(create(0), create(1), create(2), create(3));

    let mut numbers = vec![a, b, c, d];
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 4, "duplicate invoice numbers issued");

    app.cleanup().await;
}
