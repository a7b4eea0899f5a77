//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] sets up stderr logging
//! - **Transports**: [`serve`] runs a server over stdio or streamable HTTP
//! - **Results**: [`json_success`] for `CallToolResult` responses
//! - **Errors**: [`IntoMcpError`] / [`ResultExt`] for the `?` operator in tools
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{serve, ServeOptions, Transport};
//!
//! mcp_common::init_tracing("my_mcp", 0)?;
//! serve(MyServer::new(), "my-mcp", &ServeOptions::default()).await?;
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;
pub mod transport;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, invalid_params, IntoMcpError, McpResult, ResultExt};
pub use init::init_tracing;
pub use result::json_success;
pub use transport::{http_router, serve, ServeOptions, Transport};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
