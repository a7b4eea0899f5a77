//! Parameter types for Pushover MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::URGENT_SOUND;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SendParams {
    #[schemars(description = "Message body (max 1024 characters)")]
    pub message: String,

    #[schemars(description = "Message title (max 250 characters)")]
    #[serde(default)]
    pub title: Option<String>,

    #[schemars(
        description = "Priority: -2 (silent), -1 (quiet), 0 (normal), 1 (high), 2 (emergency)"
    )]
    #[serde(default)]
    pub priority: i64,

    #[schemars(
        description = "Notification sound: pushover, bike, bugle, cashregister, classical, \
                       cosmic, falling, gamelan, incoming, intermission..."
    )]
    #[serde(default)]
    pub sound: Option<String>,

    #[schemars(description = "Target specific device name")]
    #[serde(default)]
    pub device: Option<String>,

    #[schemars(description = "Supplementary URL to include")]
    #[serde(default)]
    pub url: Option<String>,

    #[schemars(description = "Title for the supplementary URL")]
    #[serde(default)]
    pub url_title: Option<String>,

    #[schemars(description = "Enable HTML formatting in message")]
    #[serde(default)]
    pub html: bool,

    #[schemars(description = "Time to live in seconds (auto-delete)")]
    #[serde(default)]
    pub ttl: Option<u64>,

    #[schemars(description = "Unix timestamp to display as the message time")]
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SendUrgentParams {
    #[schemars(description = "Urgent message body (max 1024 characters)")]
    pub message: String,

    #[schemars(description = "Message title (max 250 characters)")]
    #[serde(default)]
    pub title: Option<String>,

    #[schemars(description = "Notification sound (default: siren)")]
    #[serde(default = "default_urgent_sound")]
    pub sound: String,
}

fn default_urgent_sound() -> String {
    URGENT_SOUND.to_string()
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ValidateParams {
    #[schemars(description = "Optional device name to validate (default: all devices)")]
    #[serde(default)]
    pub device: Option<String>,
}
