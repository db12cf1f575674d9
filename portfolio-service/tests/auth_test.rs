//! Session auth integration tests.

mod common;

use common::{TestApp, OWNER_EMAIL};

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn protected_routes_need_a_session() {
    let app = TestApp::spawn().await;

    for path in [
        "/api/clients",
        "/api/settings",
        "/api/invoices",
        "/api/quotations",
        "/api/receipts",
        "/api/contracts",
        "/api/resumes",
        "/api/time-entries",
        "/api/sync/download",
    ] {
        let response = app
            .client
            .get(app.url(path))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 401, "expected 401 for {}", path);
    }

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn wrong_password_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": OWNER_EMAIL,
            "password": "not-the-password",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 401);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn login_then_logout_round_trip() {
    let app = TestApp::spawn().await;

    app.login().await;

    let response = app
        .client
        .get(app.url("/api/clients"))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let response = app
        .client
        .delete(app.url("/api/auth/login"))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let response = app
        .client
        .get(app.url("/api/clients"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 401);

    app.cleanup().await;
}
