//! Integration tests for the health surface.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["status"].as_str().unwrap(),
        "ok"
    );
}

#[tokio::test]
async fn test_detailed_health_reports_subsystems() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health/detailed", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["database"].is_string());
    assert_eq!(response.body["data"]["ws_connections"], 0);
    assert_eq!(response.body["data"]["active_rooms"], 0);
}
