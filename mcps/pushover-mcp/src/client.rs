//! Async Pushover API client
//!
//! Wraps the three endpoints the tools need. Pushover answers both
//! successes and rejected requests (4xx) with a JSON body carrying
//! `status` and `errors`, so bodies are decoded regardless of HTTP status.
//! See: https://pushover.net/api

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::PushoverConfig;
use crate::types::{
    is_known_sound, truncate_chars, ApiReply, LimitsResponse, MessageRequest, MessageResponse,
    Priority, PushoverError, ValidationResponse, EMERGENCY_EXPIRE_SECS, EMERGENCY_RETRY_SECS,
    MAX_MESSAGE_LEN, MAX_TITLE_LEN, MAX_URL_LEN, MAX_URL_TITLE_LEN, PUSHOVER_API_BASE,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest slice of a non-JSON body kept in error messages
const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Clone)]
pub struct PushoverClient {
    token: String,
    user_key: String,
    base_url: String,
    http: Client,
}

impl PushoverClient {
    pub fn new(
        token: impl Into<String>,
        user_key: impl Into<String>,
    ) -> Result<Self, PushoverError> {
        Self::with_base_url(token, user_key, PUSHOVER_API_BASE)
    }

    pub fn with_base_url(
        token: impl Into<String>,
        user_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, PushoverError> {
        let http = Client::builder()
            .user_agent(concat!("pushover-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            token: token.into(),
            user_key: user_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build a client from loaded config, failing if credentials are missing
    pub fn from_config(config: &PushoverConfig) -> Result<Self, PushoverError> {
        if !config.is_valid() {
            return Err(PushoverError::NotConfigured {
                config_path: config.config_path.display().to_string(),
            });
        }
        Self::with_base_url(&config.token, &config.user_key, &config.api_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a notification
    pub async fn send_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, PushoverError> {
        request.validate()?;

        let form = message_form(&self.token, &self.user_key, request);

        tracing::debug!(
            priority = request.priority.as_i8(),
            fields = form.len(),
            "Sending Pushover message"
        );

        let response = self
            .http
            .post(self.endpoint("messages.json"))
            .form(&form)
            .send()
            .await?;

        let raw = decode(response).await?;
        let reply: ApiReply = serde_json::from_value(raw.clone())?;

        if reply.status != 1 {
            tracing::warn!("Pushover rejected message: {:?}", reply.errors);
        }

        Ok(MessageResponse {
            success: reply.status == 1,
            request_id: reply.request,
            errors: reply.errors,
            raw,
        })
    }

    /// Validate the user/group key, optionally for one device
    pub async fn validate_user(
        &self,
        device: Option<&str>,
    ) -> Result<ValidationResponse, PushoverError> {
        let mut form = vec![
            ("token", self.token.clone()),
            ("user", self.user_key.clone()),
        ];
        if let Some(device) = device.filter(|d| !d.is_empty()) {
            form.push(("device", device.to_string()));
        }

        let response = self
            .http
            .post(self.endpoint("users/validate.json"))
            .form(&form)
            .send()
            .await?;

        let reply: ApiReply = serde_json::from_value(decode(response).await?)?;

        Ok(ValidationResponse {
            valid: reply.status == 1,
            devices: reply.devices,
            licenses: reply.licenses,
            errors: reply.errors,
        })
    }

    /// Monthly message quota for the application token
    pub async fn get_limits(&self) -> Result<LimitsResponse, PushoverError> {
        let response = self
            .http
            .get(self.endpoint("apps/limits.json"))
            .query(&[("token", self.token.as_str())])
            .send()
            .await?;

        let reply: ApiReply = serde_json::from_value(decode(response).await?)?;

        Ok(LimitsResponse {
            limit: reply.limit,
            remaining: reply.remaining,
            reset: reply.reset,
            errors: reply.errors,
        })
    }
}

/// Read a response body as JSON, whatever its HTTP status
async fn decode(response: reqwest::Response) -> Result<Value, PushoverError> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<Value>(&body) {
        Ok(value) => {
            tracing::debug!("Pushover replied {}", status);
            Ok(value)
        }
        Err(_) => Err(PushoverError::Api {
            status: status.as_u16(),
            body: truncate_chars(body.trim(), ERROR_BODY_PREVIEW).to_string(),
        }),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Form fields for `messages.json`
///
/// Over-long text fields are truncated to the API limits, unknown sounds
/// and empty optional fields are left out, and emergency priority carries
/// the mandatory `retry`/`expire` pair.
pub fn message_form(
    token: &str,
    user_key: &str,
    request: &MessageRequest,
) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("token", token.to_string()),
        ("user", user_key.to_string()),
        (
            "message",
            truncate_chars(&request.message, MAX_MESSAGE_LEN).to_string(),
        ),
    ];

    if let Some(title) = non_empty(&request.title) {
        form.push(("title", truncate_chars(title, MAX_TITLE_LEN).to_string()));
    }

    if request.priority != Priority::Normal {
        form.push(("priority", request.priority.as_i8().to_string()));
        if request.priority == Priority::Emergency {
            form.push(("retry", EMERGENCY_RETRY_SECS.to_string()));
            form.push(("expire", EMERGENCY_EXPIRE_SECS.to_string()));
        }
    }

    match non_empty(&request.sound) {
        Some(sound) if is_known_sound(sound) => form.push(("sound", sound.to_string())),
        Some(sound) => tracing::warn!("Ignoring unknown sound '{}'", sound),
        None => {}
    }

    if let Some(device) = non_empty(&request.device) {
        form.push(("device", device.to_string()));
    }
    if let Some(url) = non_empty(&request.url) {
        form.push(("url", truncate_chars(url, MAX_URL_LEN).to_string()));
    }
    if let Some(url_title) = non_empty(&request.url_title) {
        form.push((
            "url_title",
            truncate_chars(url_title, MAX_URL_TITLE_LEN).to_string(),
        ));
    }
    if request.html {
        form.push(("html", "1".to_string()));
    }
    if let Some(ttl) = request.ttl {
        form.push(("ttl", ttl.to_string()));
    }
    if let Some(timestamp) = request.timestamp {
        form.push(("timestamp", timestamp.to_string()));
    }

    form
}
