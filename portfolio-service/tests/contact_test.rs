//! Contact form integration tests.

mod common;

use common::TestApp;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn invalid_contact_payload_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let response = app
        .anonymous_client()
        .post(app.url("/api/contact"))
        .json(&serde_json::json!({
            "name": "",
            "email": "nope",
            "message": "hi",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (TEST_DATABASE_URL)"]
async fn unconfigured_mailer_surfaces_as_server_error() {
    let app = TestApp::spawn().await;

    // The test app runs without SMTP settings; a valid message must fail
    // loudly rather than vanish.
    let response = app
        .anonymous_client()
        .post(app.url("/api/contact"))
        .json(&serde_json::json!({
            "name": "Jordan",
            "email": "jordan@example.com",
            "subject": "Project inquiry",
            "message": "I would like to discuss a project with you.",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 500);

    app.cleanup().await;
}
