//! Integration tests for the chat REST surface.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_requires_identity() {
    let app = TestApp::new();

    for path in ["/api/global-chat/messages", "/api/language-chat/messages"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["success"], false);
    }
}

#[tokio::test]
async fn test_send_requires_identity() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/global-chat/messages",
            Some(json!({"message": "hello"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_identity_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            "/api/global-chat/messages",
            None,
            Some("not-a-uuid"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["message"].as_str().unwrap(),
        "Unauthorized - invalid user identity"
    );
}

#[tokio::test]
async fn test_delete_requires_identity() {
    let app = TestApp::new();

    let response = app
        .request(
            "DELETE",
            "/api/language-chat/messages/7f8a6e0e-b9a3-4c5f-9f60-0a2f4f6d9d3a",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_with_malformed_message_id_is_rejected() {
    let app = TestApp::new();

    // The message id path parameter must be a UUID.
    let response = app
        .request(
            "DELETE",
            "/api/global-chat/messages/not-a-uuid",
            None,
            Some("not-a-uuid"),
        )
        .await;

    assert!(response.status.is_client_error());
}
