//! Pushover MCP Library
//!
//! Push notifications through the Pushover API, exposed as MCP tools:
//! `pushover_send`, `pushover_send_urgent`, `pushover_validate`,
//! `pushover_limits` and `pushover_health`.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use pushover_mcp::{PushoverClient, MessageRequest};
//!
//! let client = PushoverClient::new(token, user_key)?;
//! let response = client.send_message(&MessageRequest::new("Build finished")).await?;
//! ```
//!
//! # Configuration
//! Set `PUSHOVER_TOKEN` and `PUSHOVER_USER_KEY` env vars, or create
//! `~/.config/pushover-mcp/config.json`.

pub mod client;
pub mod config;
pub mod handlers;
pub mod params;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::PushoverMcpServer;

pub use client::PushoverClient;
pub use config::PushoverConfig;
pub use types::{MessageRequest, Priority, PushoverError};

// Re-export parameter types for direct API usage
pub use params::*;
