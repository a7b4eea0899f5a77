//! Type definitions for Pushover MCP

use mcp_common::{internal_error, invalid_params, IntoMcpError, McpError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// API Constants
// ============================================================================

/// Pushover API base URL
pub const PUSHOVER_API_BASE: &str = "https://api.pushover.net/1";

pub const MAX_MESSAGE_LEN: usize = 1024;
pub const MAX_TITLE_LEN: usize = 250;
pub const MAX_URL_LEN: usize = 512;
pub const MAX_URL_TITLE_LEN: usize = 100;

/// Emergency messages are re-sent every `retry` seconds until `expire`
pub const EMERGENCY_RETRY_SECS: u32 = 60;
pub const EMERGENCY_EXPIRE_SECS: u32 = 3600;

/// Sound used by urgent notifications when none (or an unknown one) is given
pub const URGENT_SOUND: &str = "siren";

/// Notification sounds accepted by the API
pub const SOUNDS: &[&str] = &[
    "pushover",
    "bike",
    "bugle",
    "cashregister",
    "classical",
    "cosmic",
    "falling",
    "gamelan",
    "incoming",
    "intermission",
    "magic",
    "mechanical",
    "pianobar",
    "siren",
    "spacealarm",
    "tugboat",
    "alien",
    "climb",
    "persistent",
    "echo",
    "updown",
    "vibrate",
    "none",
];

pub fn is_known_sound(sound: &str) -> bool {
    SOUNDS.contains(&sound)
}

/// Cut `s` to at most `max` characters without splitting a character
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ============================================================================
// Priority
// ============================================================================

/// Message priority, -2 (silent) to 2 (emergency)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// No notification at all
    Lowest,
    /// No sound or vibration
    Low,
    #[default]
    Normal,
    /// Bypasses quiet hours
    High,
    /// Repeats until acknowledged or expired
    Emergency,
}

impl Priority {
    pub fn as_i8(self) -> i8 {
        match self {
            Priority::Lowest => -2,
            Priority::Low => -1,
            Priority::Normal => 0,
            Priority::High => 1,
            Priority::Emergency => 2,
        }
    }
}

impl TryFrom<i64> for Priority {
    type Error = PushoverError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -2 => Ok(Priority::Lowest),
            -1 => Ok(Priority::Low),
            0 => Ok(Priority::Normal),
            1 => Ok(Priority::High),
            2 => Ok(Priority::Emergency),
            _ => Err(PushoverError::InvalidParams(
                "Priority must be between -2 and 2".to_string(),
            )),
        }
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// A notification to send through `messages.json`
#[derive(Debug, Clone, Default)]
pub struct MessageRequest {
    pub message: String,
    pub title: Option<String>,
    pub priority: Priority,
    pub sound: Option<String>,
    pub device: Option<String>,
    pub url: Option<String>,
    pub url_title: Option<String>,
    pub html: bool,
    /// Seconds until the message is deleted from devices
    pub ttl: Option<u64>,
    /// Unix timestamp shown as the message time
    pub timestamp: Option<i64>,
}

impl MessageRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Checks the constraints the API would otherwise reject
    pub fn validate(&self) -> Result<(), PushoverError> {
        if self.message.trim().is_empty() {
            return Err(PushoverError::InvalidParams(
                "message cannot be empty".to_string(),
            ));
        }
        if self.ttl == Some(0) {
            return Err(PushoverError::InvalidParams(
                "ttl must be a positive number of seconds".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Result of `messages.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub success: bool,
    pub request_id: String,
    pub errors: Vec<String>,
    pub raw: serde_json::Value,
}

/// Result of `users/validate.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResponse {
    pub valid: bool,
    pub devices: Vec<String>,
    pub licenses: Vec<String>,
    pub errors: Vec<String>,
}

/// Result of `apps/limits.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LimitsResponse {
    pub limit: u64,
    pub remaining: u64,
    /// Unix timestamp of the next monthly reset
    pub reset: i64,
    pub errors: Vec<String>,
}

impl LimitsResponse {
    /// Share of the monthly quota already used, rounded to one decimal
    pub fn usage_percent(&self) -> f64 {
        let limit = self.limit.max(1) as f64;
        let used = (1.0 - self.remaining as f64 / limit) * 100.0;
        (used * 10.0).round() / 10.0
    }
}

/// Wire shape shared by all Pushover JSON replies
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiReply {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub request: String,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub devices: Vec<String>,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub remaining: u64,
    #[serde(default)]
    pub reset: i64,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum PushoverError {
    #[error(
        "Pushover credentials not configured. Set PUSHOVER_TOKEN and PUSHOVER_USER_KEY \
         environment variables, or create {config_path}"
    )]
    NotConfigured { config_path: String },

    #[error("{0}")]
    InvalidParams(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Pushover API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoMcpError for PushoverError {
    fn into_mcp_error(self) -> McpError {
        match &self {
            PushoverError::InvalidParams(_) => invalid_params(self.to_string()),
            _ => internal_error(self.to_string()),
        }
    }
}

impl From<PushoverError> for McpError {
    fn from(err: PushoverError) -> Self {
        err.into_mcp_error()
    }
}
