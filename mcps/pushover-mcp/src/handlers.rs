//! Tool handlers
//!
//! Each handler validates its parameters, makes one API call and shapes
//! the reply. Rejections reported by Pushover itself are returned as
//! normal tool output (`success: false` plus the API's `errors`) so the
//! caller can read them; only local validation and transport failures
//! become MCP errors.

use mcp_common::{json_success, CallToolResult, McpResult, ResultExt};
use serde_json::json;

use crate::client::PushoverClient;
use crate::params::{SendParams, SendUrgentParams, ValidateParams};
use crate::types::{is_known_sound, MessageRequest, MessageResponse, Priority, URGENT_SOUND};

fn send_result(response: MessageResponse, sent: &str) -> McpResult<CallToolResult> {
    if response.success {
        json_success(&json!({
            "success": true,
            "message": sent,
            "request_id": response.request_id,
        }))
    } else {
        json_success(&json!({
            "success": false,
            "errors": response.errors,
            "request_id": response.request_id,
        }))
    }
}

pub async fn send(client: &PushoverClient, params: SendParams) -> McpResult<CallToolResult> {
    let priority = match Priority::try_from(params.priority) {
        Ok(priority) => priority,
        Err(e) => {
            return json_success(&json!({
                "success": false,
                "error": e.to_string(),
            }))
        }
    };

    let request = MessageRequest {
        message: params.message,
        title: params.title,
        priority,
        sound: params.sound,
        device: params.device,
        url: params.url,
        url_title: params.url_title,
        html: params.html,
        ttl: params.ttl,
        timestamp: params.timestamp,
    };

    tracing::info!("Sending notification (priority {})", priority.as_i8());

    let response = client.send_message(&request).await.to_mcp_err()?;
    send_result(response, "Notification sent successfully")
}

pub async fn send_urgent(
    client: &PushoverClient,
    params: SendUrgentParams,
) -> McpResult<CallToolResult> {
    let sound = if is_known_sound(&params.sound) {
        params.sound
    } else {
        tracing::warn!(
            "Unknown sound '{}', falling back to {}",
            params.sound,
            URGENT_SOUND
        );
        URGENT_SOUND.to_string()
    };

    let request = MessageRequest {
        title: params.title,
        priority: Priority::High,
        sound: Some(sound),
        ..MessageRequest::new(params.message)
    };

    tracing::info!("Sending urgent notification");

    let response = client.send_message(&request).await.to_mcp_err()?;
    send_result(response, "Urgent notification sent successfully")
}

pub async fn validate(
    client: &PushoverClient,
    params: ValidateParams,
) -> McpResult<CallToolResult> {
    let response = client
        .validate_user(params.device.as_deref())
        .await
        .to_mcp_err()?;

    if response.valid {
        json_success(&json!({
            "valid": true,
            "devices": response.devices,
            "licenses": response.licenses,
        }))
    } else {
        json_success(&json!({
            "valid": false,
            "errors": response.errors,
        }))
    }
}

pub async fn limits(client: &PushoverClient) -> McpResult<CallToolResult> {
    let response = client.get_limits().await.to_mcp_err()?;

    if !response.errors.is_empty() {
        return json_success(&json!({
            "success": false,
            "errors": response.errors,
        }));
    }

    let reset_at = chrono::DateTime::from_timestamp(response.reset, 0).map(|t| t.to_rfc3339());

    json_success(&json!({
        "limit": response.limit,
        "remaining": response.remaining,
        "reset_timestamp": response.reset,
        "reset_at": reset_at,
        "usage_percent": response.usage_percent(),
    }))
}

/// Reports on configuration and credentials; never returns an MCP error
/// for a Pushover-side problem
pub async fn health(client: Option<&PushoverClient>) -> McpResult<CallToolResult> {
    let Some(client) = client else {
        return json_success(&json!({
            "status": "unhealthy",
            "error": "Credentials not configured",
        }));
    };

    match client.validate_user(None).await {
        Ok(response) if response.valid => json_success(&json!({
            "status": "healthy",
            "credentials_valid": true,
            "devices": response.devices,
        })),
        Ok(response) => json_success(&json!({
            "status": "unhealthy",
            "credentials_valid": false,
            "errors": response.errors,
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            json_success(&json!({
                "status": "error",
                "error": e.to_string(),
            }))
        }
    }
}
