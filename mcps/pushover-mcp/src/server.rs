//! MCP Server implementation for Pushover notifications
//!
//! Tools delegate to the handlers module. Credentials are resolved once at
//! construction; without them every tool except `pushover_health` fails
//! with an error explaining how to configure them.

use mcp_common::{
    async_trait, CallToolResult, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError, Tool,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::client::PushoverClient;
use crate::config::PushoverConfig;
use crate::handlers;
use crate::params::{SendParams, SendUrgentParams, ValidateParams};
use crate::types::PushoverError;

const INSTRUCTIONS: &str = "Pushover MCP server for sending push notifications to the \
     configured user or group. Configure PUSHOVER_TOKEN and PUSHOVER_USER_KEY \
     environment variables (or ~/.config/pushover-mcp/config.json) to enable it.";

/// The Pushover MCP Server
#[derive(Clone)]
pub struct PushoverMcpServer {
    config: PushoverConfig,
    client: Option<PushoverClient>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl PushoverMcpServer {
    /// Create a server from environment variables and the config file
    pub fn from_env() -> Result<Self, PushoverError> {
        Self::with_config(PushoverConfig::load())
    }

    /// Create a server with explicit config
    ///
    /// Incomplete credentials are not an error here; they are reported by
    /// the tools.
    pub fn with_config(config: PushoverConfig) -> Result<Self, PushoverError> {
        let client = if config.is_valid() {
            Some(PushoverClient::from_config(&config)?)
        } else {
            None
        };

        Ok(Self {
            config,
            client,
            tool_router: Self::tool_router(),
        })
    }

    fn client(&self) -> Result<&PushoverClient, McpError> {
        self.client.as_ref().ok_or_else(|| {
            PushoverError::NotConfigured {
                config_path: self.config.config_path.display().to_string(),
            }
            .into()
        })
    }

    #[tool(
        description = "Send a Pushover notification to the configured user/group with full \
                       customization options including priority levels, sounds, and URLs."
    )]
    async fn pushover_send(
        &self,
        Parameters(params): Parameters<SendParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::send(self.client()?, params).await
    }

    #[tool(
        description = "Send an urgent high-priority Pushover notification (priority 1, loud \
                       sound, default siren). Use this when you need immediate attention from the user."
    )]
    async fn pushover_send_urgent(
        &self,
        Parameters(params): Parameters<SendUrgentParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::send_urgent(self.client()?, params).await
    }

    #[tool(
        description = "Validate Pushover credentials and list the registered devices of the \
                       configured user/group key."
    )]
    async fn pushover_validate(
        &self,
        Parameters(params): Parameters<ValidateParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::validate(self.client()?, params).await
    }

    #[tool(
        description = "Check Pushover API message limits: monthly limit, remaining messages, \
                       and when the limit resets."
    )]
    async fn pushover_limits(&self) -> Result<CallToolResult, McpError> {
        handlers::limits(self.client()?).await
    }

    #[tool(description = "Check Pushover MCP server health: configuration and credential validity.")]
    async fn pushover_health(&self) -> Result<CallToolResult, McpError> {
        handlers::health(self.client.as_ref()).await
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for PushoverMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for PushoverMcpServer {
    fn server_name(&self) -> &str {
        "pushover"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "pushover_send" => {
                let params: SendParams = serde_json::from_value(params)?;
                self.pushover_send(Parameters(params)).await.map_err(Into::into)
            }

            "pushover_send_urgent" => {
                let params: SendUrgentParams = serde_json::from_value(params)?;
                self.pushover_send_urgent(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "pushover_validate" => {
                let params: ValidateParams = serde_json::from_value(params)?;
                self.pushover_validate(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "pushover_limits" => self.pushover_limits().await.map_err(Into::into),

            "pushover_health" => self.pushover_health().await.map_err(Into::into),

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
