//! Item API tests over a live socket.

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::TestServer;

#[tokio::test]
async fn get_all_items_returns_seed() {
    let server = TestServer::start().await;

    let response = server.client().get(server.url("/api/items")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["name"], "Sample Item 1");
}

#[tokio::test]
async fn create_fetch_update_delete() {
    let server = TestServer::start().await;
    let client = server.client();

    let response = client
        .post(server.url("/items"))
        .json(&json!({"name": "Test Item", "description": "Test description"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["data"]["id"], 3);

    let fetched: Value = client
        .get(server.url("/items/3"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["data"], created["data"]);

    let response = client
        .put(server.url("/items/1"))
        .json(&json!({"name": "Updated Name"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(
        updated["data"],
        json!({"id": 1, "name": "Updated Name", "description": "This is a sample item"})
    );

    let response = client.delete(server.url("/items/3")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: Value = response.json().await.unwrap();
    assert_eq!(deleted, json!({"success": true, "message": "Item deleted"}));

    let response = client.get(server.url("/items/3")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_without_name_fails() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .post(server.url("/api/items"))
        .json(&json!({"description": "No name"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "error": "Name is required"}));
}

#[tokio::test]
async fn create_accepts_body_without_content_type() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .post(server.url("/items"))
        .body(r#"{"name":"Plain body"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["description"], "");
}

#[tokio::test]
async fn missing_item_returns_404() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .get(server.url("/api/items/99999"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Item not found");
}

#[tokio::test]
async fn deleted_ids_are_not_reissued() {
    let server = TestServer::start().await;
    let client = server.client();

    let first: Value = client
        .post(server.url("/items"))
        .json(&json!({"name": "To Delete"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let first_id = first["data"]["id"].as_u64().unwrap();

    let response = client
        .delete(server.url(&format!("/items/{first_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let second: Value = client
        .post(server.url("/items"))
        .json(&json!({"name": "After delete"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(second["data"]["id"].as_u64().unwrap() > first_id);
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let server = TestServer::start().await;

    let requests = (0..16).map(|i| {
        server
            .client()
            .post(server.url("/items"))
            .json(&json!({"name": format!("item {i}")}))
            .send()
    });
    let mut ids = Vec::new();
    for response in spawn_all(requests).await {
        let body: Value = response.unwrap().json().await.unwrap();
        ids.push(body["data"]["id"].as_u64().unwrap());
    }

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids, (3..19).collect::<Vec<u64>>());

    let listing: Value = server
        .client()
        .get(server.url("/items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["count"], 18);
}

#[tokio::test]
async fn unknown_endpoint_returns_404_envelope() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .get(server.url("/unknown-endpoint"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "error": "Endpoint not found"}));
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/api/items"))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

/// Run the request futures concurrently on the test runtime.
async fn spawn_all<F, T>(futures: impl Iterator<Item = F>) -> Vec<T>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<_> = futures.map(tokio::spawn).collect();
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.expect("request task panicked"));
    }
    results
}
