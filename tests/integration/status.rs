//! Status endpoint tests.

use item_service::config::Config;
use reqwest::StatusCode;
use serde_json::Value;

use crate::TestServer;

#[tokio::test]
async fn health_reports_healthy_with_uptime() {
    let server = TestServer::start().await;

    let response = server.client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body.get("timestamp").is_some());
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn ready_reports_ready() {
    let server = TestServer::start().await;

    let response = server.client().get(server.url("/ready")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn version_reflects_configuration() {
    let config = Config {
        version: "2.0.1".to_string(),
        commit_sha: Some("0a1b2c3".to_string()),
        environment: Some("staging".to_string()),
        build_time: Some("2026-02-02T10:00:00Z".to_string()),
        ..Config::default()
    };
    let server = TestServer::start_with(config).await;

    let body: Value = server
        .client()
        .get(server.url("/version"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body,
        serde_json::json!({
            "version": "2.0.1",
            "buildTime": "2026-02-02T10:00:00Z",
            "commitSha": "0a1b2c3",
            "environment": "staging"
        })
    );
}

#[tokio::test]
async fn version_snapshot_is_stable_between_requests() {
    let server = TestServer::start().await;

    let first: Value = server
        .client()
        .get(server.url("/version"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second: Value = server
        .client()
        .get(server.url("/version"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first, second);
}
