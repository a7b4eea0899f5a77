//! Tool-level tests: drive the server in-process through `EmbeddableMcp`
//! with the API mocked by httpmock.

use httpmock::prelude::*;
use mcp_common::{CallToolResult, EmbeddableError, EmbeddableMcp};
use pushover_mcp::{PushoverConfig, PushoverMcpServer};
use serde_json::{json, Value};

fn server_for(mock: &MockServer) -> PushoverMcpServer {
    let config =
        PushoverConfig::new("test_token", "test_user_key").with_api_url(mock.base_url());
    PushoverMcpServer::with_config(config).unwrap()
}

fn body(result: &CallToolResult) -> Value {
    let rmcp::model::RawContent::Text(text) = &result.content[0].raw else {
        panic!("expected text content");
    };
    serde_json::from_str(&text.text).unwrap()
}

#[tokio::test]
async fn send_reports_request_id() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(POST)
            .path("/messages.json")
            .x_www_form_urlencoded_tuple("message", "Build finished");
        then.status(200)
            .json_body(json!({ "status": 1, "request": "req123" }));
    })
    .await;

    let result = server_for(&api)
        .call_tool("pushover_send", json!({ "message": "Build finished" }))
        .await
        .unwrap();

    let body = body(&result);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Notification sent successfully");
    assert_eq!(body["request_id"], "req123");
}

#[tokio::test]
async fn send_reports_api_errors() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(POST).path("/messages.json");
        then.status(400).json_body(json!({
            "status": 0,
            "request": "err1",
            "errors": ["application token is invalid"],
        }));
    })
    .await;

    let result = server_for(&api)
        .call_tool("pushover_send", json!({ "message": "hi" }))
        .await
        .unwrap();

    let body = body(&result);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"][0], "application token is invalid");
    assert_eq!(body["request_id"], "err1");
}

#[tokio::test]
async fn send_rejects_out_of_range_priority() {
    let api = MockServer::start_async().await;
    let mock = api
        .mock_async(|when, then| {
            when.method(POST).path("/messages.json");
            then.status(200).json_body(json!({ "status": 1, "request": "x" }));
        })
        .await;

    let result = server_for(&api)
        .call_tool("pushover_send", json!({ "message": "hi", "priority": 3 }))
        .await
        .unwrap();

    let body = body(&result);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Priority must be between -2 and 2");
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn send_rejects_zero_ttl() {
    let api = MockServer::start_async().await;

    let result = server_for(&api)
        .call_tool("pushover_send", json!({ "message": "hi", "ttl": 0 }))
        .await;

    match result {
        Err(EmbeddableError::McpError(message)) => assert!(message.contains("ttl")),
        other => panic!("expected ttl error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn urgent_uses_high_priority_and_siren_fallback() {
    let api = MockServer::start_async().await;
    let mock = api
        .mock_async(|when, then| {
            when.method(POST)
                .path("/messages.json")
                .x_www_form_urlencoded_tuple("priority", "1")
                .x_www_form_urlencoded_tuple("sound", "siren");
            then.status(200)
                .json_body(json!({ "status": 1, "request": "urgent1" }));
        })
        .await;

    let result = server_for(&api)
        .call_tool(
            "pushover_send_urgent",
            json!({ "message": "Deploy failed", "sound": "kazoo" }),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    let body = body(&result);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Urgent notification sent successfully");
}

#[tokio::test]
async fn urgent_keeps_known_sound() {
    let api = MockServer::start_async().await;
    let mock = api
        .mock_async(|when, then| {
            when.method(POST)
                .path("/messages.json")
                .x_www_form_urlencoded_tuple("sound", "spacealarm");
            then.status(200)
                .json_body(json!({ "status": 1, "request": "urgent2" }));
        })
        .await;

    server_for(&api)
        .call_tool(
            "pushover_send_urgent",
            json!({ "message": "Tests red", "sound": "spacealarm" }),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn validate_lists_devices() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(POST).path("/users/validate.json");
        then.status(200).json_body(json!({
            "status": 1,
            "devices": ["iphone", "desktop"],
            "licenses": ["iOS"],
        }));
    })
    .await;

    let result = server_for(&api)
        .call_tool("pushover_validate", json!({}))
        .await
        .unwrap();

    let body = body(&result);
    assert_eq!(body["valid"], true);
    assert_eq!(body["devices"], json!(["iphone", "desktop"]));
    assert_eq!(body["licenses"], json!(["iOS"]));
}

#[tokio::test]
async fn validate_reports_invalid_key() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(POST).path("/users/validate.json");
        then.status(400)
            .json_body(json!({ "status": 0, "errors": ["user key is invalid"] }));
    })
    .await;

    let result = server_for(&api)
        .call_tool("pushover_validate", json!({ "device": "watch" }))
        .await
        .unwrap();

    let body = body(&result);
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"][0], "user key is invalid");
}

#[tokio::test]
async fn limits_reports_usage() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(GET).path("/apps/limits.json");
        then.status(200).json_body(json!({
            "status": 1,
            "limit": 10000,
            "remaining": 9500,
            "reset": 1700000000,
        }));
    })
    .await;

    let result = server_for(&api)
        .call_tool("pushover_limits", json!({}))
        .await
        .unwrap();

    let body = body(&result);
    assert_eq!(body["limit"], 10000);
    assert_eq!(body["remaining"], 9500);
    assert_eq!(body["reset_timestamp"], 1700000000);
    assert_eq!(body["reset_at"], "2023-11-14T22:13:20+00:00");
    assert_eq!(body["usage_percent"], 5.0);
}

#[tokio::test]
async fn limits_reports_api_errors() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(GET).path("/apps/limits.json");
        then.status(400)
            .json_body(json!({ "status": 0, "errors": ["application token is invalid"] }));
    })
    .await;

    let result = server_for(&api)
        .call_tool("pushover_limits", json!({}))
        .await
        .unwrap();

    let body = body(&result);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"][0], "application token is invalid");
}

#[tokio::test]
async fn health_healthy_with_valid_credentials() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(POST).path("/users/validate.json");
        then.status(200).json_body(json!({
            "status": 1,
            "devices": ["iphone"],
            "licenses": [],
        }));
    })
    .await;

    let result = server_for(&api)
        .call_tool("pushover_health", json!({}))
        .await
        .unwrap();

    let body = body(&result);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["credentials_valid"], true);
    assert_eq!(body["devices"], json!(["iphone"]));
}

#[tokio::test]
async fn health_unhealthy_with_rejected_credentials() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(POST).path("/users/validate.json");
        then.status(400)
            .json_body(json!({ "status": 0, "errors": ["user key is invalid"] }));
    })
    .await;

    let result = server_for(&api)
        .call_tool("pushover_health", json!({}))
        .await
        .unwrap();

    let body = body(&result);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["credentials_valid"], false);
    assert_eq!(body["errors"][0], "user key is invalid");
}

#[tokio::test]
async fn health_error_when_api_unreachable() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(POST).path("/users/validate.json");
        then.status(503).body("Service Unavailable");
    })
    .await;

    let result = server_for(&api)
        .call_tool("pushover_health", json!({}))
        .await
        .unwrap();

    let body = body(&result);
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().unwrap().contains("503"));
}
