//! Integration tests for WebSocket upgrade negotiation.

use crate::helpers::TestApp;

#[tokio::test]
async fn test_ws_route_requires_upgrade_headers() {
    let app = TestApp::new();

    // A plain GET without the upgrade handshake must be rejected.
    let response = app.request("GET", "/ws", None, None).await;

    assert!(
        response.status.is_client_error(),
        "Expected a 4xx for a non-upgrade request, got {}",
        response.status
    );
}

#[tokio::test]
async fn test_ws_route_accepts_missing_user_id_param() {
    let app = TestApp::new();

    // The userId query parameter is optional; its absence must not change
    // the negotiation outcome.
    let with_param = app
        .request("GET", "/ws?userId=7f8a6e0e-b9a3-4c5f-9f60-0a2f4f6d9d3a", None, None)
        .await;
    let without_param = app.request("GET", "/ws", None, None).await;

    assert_eq!(with_param.status, without_param.status);
}
