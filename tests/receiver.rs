//! Integration tests for the HTTP receiver service.

use serde_json::Value;

mod common;

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let addr = common::start_receiver().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn process_echoes_baggage_from_headers() {
    let addr = common::start_receiver().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{addr}/process"))
        .header("baggage-user.id", "user-1001")
        .header("baggage-message.number", "1")
        .header("x-unrelated", "ignored")
        .json(&serde_json::json!({
            "messageId": 1,
            "timestamp": "2024-01-01T00:00:00Z",
            "data": "Message 1"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["messageId"], 1);
    assert!(body["processedAt"].is_string());
    assert_eq!(body["baggageReceived"]["user.id"], "user-1001");
    assert_eq!(body["baggageReceived"]["message.number"], "1");
    // unrelated headers never leak into the echoed baggage
    assert!(body["baggageReceived"]
        .as_object()
        .unwrap()
        .keys()
        .all(|k| !k.contains("unrelated")));
}

#[tokio::test]
async fn process_without_baggage_echoes_empty_map() {
    let addr = common::start_receiver().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{addr}/process"))
        .json(&serde_json::json!({
            "messageId": 2,
            "timestamp": "2024-01-01T00:00:00Z",
            "data": "Message 2"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert!(body["baggageReceived"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_route_returns_404_shape() {
    let addr = common::start_receiver().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/nope"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn unparseable_body_returns_500_shape() {
    let addr = common::start_receiver().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{addr}/process"))
        .header("content-type", "application/json")
        .body("this is not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
}
