//! Client registry integration tests.

mod common;

use common::{client_payload, invoice_payload, TestApp};

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn upsert_without_id_creates_and_with_id_updates() {
    let app = TestApp::spawn().await;
    app.login().await;

    let created: serde_json::Value = app
        .client
        .post(app.url("/api/clients"))
        .json(&client_payload("Acme Corp"))
        .send()
        .await
        .expect("Failed to create client")
        .json()
        .await
        .expect("Invalid body");
    let id = created["id"].as_str().expect("Missing id").to_string();
    assert_eq!(created["name"], "Acme Corp");

    let mut update = client_payload("Acme Corporation");
    update["id"] = serde_json::json!(id);
    let updated: serde_json::Value = app
        .client
        .post(app.url("/api/clients"))
        .json(&update)
        .send()
        .await
        .expect("Failed to update client")
        .json()
        .await
        .expect("Invalid body");

    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "Acme Corporation");

    let list: Vec<serde_json::Value> = app
        .client
        .get(app.url("/api/clients"))
        .send()
        .await
        .expect("Failed to list clients")
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(list.len(), 1);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn delete_of_unreferenced_client_succeeds() {
    let app = TestApp::spawn().await;
    app.login().await;

    let created: serde_json::Value = app
        .client
        .post(app.url("/api/clients"))
        .json(&client_payload("Ephemeral"))
        .send()
        .await
        .expect("Failed to create client")
        .json()
        .await
        .expect("Invalid body");
    let id = created["id"].as_str().unwrap();

    let response = app
        .client
        .delete(app.url(&format!("/api/clients?id={}", id)))
        .send()
        .await
        .expect("Failed to delete client");
    assert!(response.status().is_success());

    let response = app
        .client
        .get(app.url(&format!("/api/clients?id={}", id)))
        .send()
        .await
        .expect("Failed to get client");
    assert_eq!(response.status(), 404);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn delete_of_referenced_client_is_a_conflict() {
    let app = TestApp::spawn().await;
    app.login().await;

    let created: serde_json::Value = app
        .client
        .post(app.url("/api/clients"))
        .json(&client_payload("Billed Client"))
        .send()
        .await
        .expect("Failed to create client")
        .json()
        .await
        .expect("Invalid body");
    let id = created["id"].as_str().unwrap();

    let response = app
        .client
        .post(app.url("/api/invoices"))
        .json(&invoice_payload(id))
        .send()
        .await
        .expect("Failed to create invoice");
    assert_eq!(response.status(), 201);

    let response = app
        .client
        .delete(app.url(&format!("/api/clients?id={}", id)))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(response.status(), 409);

    app.cleanup().await;
}
