//! Integration tests for LocationClient using wiremock.
//!
//! These tests verify the LocationClient behavior against a mock HTTP server.

use std::time::Duration;

use skyline_services::{LocationClient, LocationRecord, LocationStore, LocationStoreError, RetryConfig};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> LocationClient {
    LocationClient::new(
        &format!("{}/api", server.uri()),
        Duration::from_secs(2),
        RetryConfig::new(2, 1, 5),
    )
    .unwrap()
}

fn names(records: &[LocationRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn test_fetch_locations_preserves_server_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/locations/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "locations": [
                {"location_name": "Seoul", "latitude": 37.56, "longitude": 126.97},
                {"location_name": "Busan", "latitude": null, "longitude": null},
                {"location_name": "Incheon"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let locations = client.fetch_locations("alice").await.unwrap();

    assert_eq!(names(&locations), vec!["Seoul", "Busan", "Incheon"]);
    assert_eq!(locations[0].coordinates(), Some((37.56, 126.97)));
    assert!(locations[1].coordinates().is_none());
}

#[tokio::test]
async fn test_fetch_locations_server_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/locations/alice"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "success": false,
            "error": "User not found"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch_locations("alice").await.unwrap_err();

    match err {
        LocationStoreError::Server(message) => assert_eq!(message, "User not found"),
        other => unreachable!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_locations_undecodable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/locations/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch_locations("alice").await.unwrap_err();

    assert!(err.is_network(), "expected transport-class error, got {err:?}");
}

#[tokio::test]
async fn test_fetch_locations_unreachable_is_network_error() {
    // Nothing listens on the discard port.
    let client = LocationClient::new(
        "http://127.0.0.1:9/api",
        Duration::from_millis(500),
        RetryConfig::none(),
    )
    .unwrap();

    let err = client.fetch_locations("alice").await.unwrap_err();
    assert!(matches!(err, LocationStoreError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_add_location_sends_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/locations"))
        .and(body_json(serde_json::json!({
            "userId": "alice",
            "locationName": "Daejeon",
            "latitude": 36.35,
            "longitude": 127.38
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Location added successfully"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let message = client
        .add_location("alice", "Daejeon", Some((36.35, 127.38)))
        .await
        .unwrap();

    assert_eq!(message, "Location added successfully");
}

#[tokio::test]
async fn test_add_location_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/locations"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "success": false,
            "error": "Failed to add location"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.add_location("alice", "Seoul", None).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to add location");
}

#[tokio::test]
async fn test_delete_location_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/locations"))
        .and(body_json(serde_json::json!({
            "userId": "alice",
            "locationName": "Busan"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Location deleted successfully"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let message = client.delete_location("alice", "Busan").await.unwrap();

    assert_eq!(message, "Location deleted successfully");
}

#[tokio::test]
async fn test_replace_order_sends_full_sequence() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/locations/order"))
        .and(body_json(serde_json::json!({
            "userId": "alice",
            "locations": ["D", "A", "B", "C"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Location order updated successfully"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let order: Vec<String> = ["D", "A", "B", "C"].iter().map(|s| s.to_string()).collect();
    let message = client.replace_order("alice", &order).await.unwrap();

    assert_eq!(message, "Location order updated successfully");
}

#[tokio::test]
async fn test_replace_order_retries_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/locations/order"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/locations/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Location order updated successfully"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let order = vec!["A".to_string()];
    let result = client.replace_order("alice", &order).await;

    assert!(result.is_ok(), "should succeed after retries: {result:?}");
}

#[tokio::test]
async fn test_replace_order_no_retry_on_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/locations/order"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "error": "userId and locations array are required"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.replace_order("alice", &[]).await.unwrap_err();

    assert_eq!(err.to_string(), "userId and locations array are required");
}

#[tokio::test]
async fn test_error_without_json_body_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/locations"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.delete_location("alice", "Nowhere").await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 404");
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.health_check().await.unwrap());
}

#[tokio::test]
async fn test_health_check_failure_after_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(!client.health_check().await.unwrap());
}

#[tokio::test]
async fn test_replace_order_gives_up_after_retry_budget() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/locations/order"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .replace_order("alice", &["A".to_string()])
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP 503");
}

#[tokio::test]
async fn test_fetch_locations_recovers_from_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/locations/alice"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/locations/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "locations": [{"location_name": "Seoul"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let locations = client.fetch_locations("alice").await.unwrap();

    assert_eq!(names(&locations), vec!["Seoul"]);
}
