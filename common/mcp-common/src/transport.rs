//! Transport selection and serving
//!
//! Servers run over stdio (the default, for editor integrations) or over
//! rmcp's streamable HTTP service mounted at `/mcp`, with a `/health`
//! liveness route next to it.

use anyhow::Context;
use axum::{response::Json, routing::get, Router};
use rmcp::{
    transport::{
        stdio,
        streamable_http_server::{session::local::LocalSessionManager, StreamableHttpService},
    },
    ServerHandler, ServiceExt,
};
use tokio::net::TcpListener;

/// How the server talks to its client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    #[default]
    Stdio,
    /// Streamable HTTP (also accepted as `sse`)
    #[value(alias = "sse")]
    Http,
}

/// Where and how to serve
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub transport: Transport,
    pub host: String,
    pub port: u16,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServeOptions {
    /// Bind the HTTP listener; `host` may be an IP literal or a hostname
    pub async fn bind(&self) -> anyhow::Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Failed to bind to {}:{}", self.host, self.port))
    }
}

/// Serve `server` until the client disconnects (stdio) or ctrl-c (HTTP)
pub async fn serve<S>(server: S, name: &str, options: &ServeOptions) -> anyhow::Result<()>
where
    S: ServerHandler + Clone + Send + Sync + 'static,
{
    match options.transport {
        Transport::Stdio => serve_stdio(server, name).await,
        Transport::Http => serve_http(server, name, options.bind().await?).await,
    }
}

async fn serve_stdio<S>(server: S, name: &str) -> anyhow::Result<()>
where
    S: ServerHandler + Send + 'static,
{
    tracing::info!("Starting {} MCP Server on stdio", name);

    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}

/// Router with the MCP service at `/mcp` and a `/health` liveness route
pub fn http_router<S>(server: S, name: &str) -> Router
where
    S: ServerHandler + Clone + Send + Sync + 'static,
{
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let service_name = name.to_string();
    Router::new().nest_service("/mcp", service).route(
        "/health",
        get(move || {
            let service_name = service_name.clone();
            async move {
                Json(serde_json::json!({
                    "status": "healthy",
                    "service": service_name,
                }))
            }
        }),
    )
}

async fn serve_http<S>(server: S, name: &str, listener: TcpListener) -> anyhow::Result<()>
where
    S: ServerHandler + Clone + Send + Sync + 'static,
{
    let router = http_router(server, name);
    let addr = listener.local_addr()?;

    tracing::info!("Starting {} MCP Server on http://{}/mcp", name, addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    tracing::info!("Server shutting down");
    Ok(())
}
