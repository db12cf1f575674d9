//! Token backfill integration tests.

mod common;

use common::{client_payload, TestApp};
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn backfill_is_idempotent() {
    let app = TestApp::spawn().await;
    app.login().await;

    let created: serde_json::Value = app
        .client
        .post(app.url("/api/clients"))
        .json(&client_payload("Legacy Client"))
        .send()
        .await
        .expect("Failed to create client")
        .json()
        .await
        .expect("Invalid body");
    let client_id: Uuid = created["id"].as_str().unwrap().parse().unwrap();

    let (owner_id,): (Uuid,) = sqlx::query_as("SELECT owner_id FROM clients WHERE id = $1")
        .bind(client_id)
        .fetch_one(app.db.pool())
        .await
        .expect("Failed to read owner");

    // Seed a legacy invoice that predates token issuance.
    let legacy_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO invoices (id, owner_id, invoice_number, client_id, issue_date, due_date,
            status, currency)
        VALUES ($1, $2, 'INV-LEGACY-1', $3, '2024-01-01', '2024-01-31', 'paid', 'USD')
        "#,
    )
    .bind(legacy_id)
    .bind(owner_id)
    .bind(client_id)
    .execute(app.db.pool())
    .await
    .expect("Failed to seed legacy invoice");

    // First run assigns exactly one token.
    let report: serde_json::Value = app
        .client
        .post(app.url("/api/maintenance/backfill-tokens"))
        .send()
        .await
        .expect("Failed to run backfill")
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(report["invoices"], 1);

    let (token_after_first,): (Option<Uuid>,) =
        sqlx::query_as("SELECT token FROM invoices WHERE id = $1")
            .bind(legacy_id)
            .fetch_one(app.db.pool())
            .await
            .expect("Failed to read token");
    let token_after_first = token_after_first.expect("Backfill left token NULL");

    // Second run touches nothing.
    let report: serde_json::Value = app
        .client
        .post(app.url("/api/maintenance/backfill-tokens"))
        .send()
        .await
        .expect("Failed to run backfill")
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(report["invoices"], 0);
    assert_eq!(report["quotations"], 0);
    assert_eq!(report["receipts"], 0);
    assert_eq!(report["contracts"], 0);

    let (token_after_second,): (Option<Uuid>,) =
        sqlx::query_as("SELECT token FROM invoices WHERE id = $1")
            .bind(legacy_id)
            .fetch_one(app.db.pool())
            .await
            .expect("Failed to read token");
    assert_eq!(token_after_second, Some(token_after_first));

    app.cleanup().await;
}
