//! Pushover MCP Server
//!
//! Send notifications via MCP over stdio (default) or streamable HTTP.
//!
//! # Configuration
//! Set `PUSHOVER_TOKEN` and `PUSHOVER_USER_KEY` env vars, or create
//! `~/.config/pushover-mcp/config.json`.

use clap::{ArgAction, Parser};
use mcp_common::{ServeOptions, Transport};
use pushover_mcp::PushoverMcpServer;

#[derive(Parser)]
#[command(name = "pushover-mcp", version)]
#[command(about = "Pushover MCP Server - send notifications via MCP")]
struct Cli {
    /// Transport mode: stdio (for editors) or http (network server)
    #[arg(long, value_enum, default_value_t = Transport::Stdio, env = "PUSHOVER_MCP_TRANSPORT")]
    transport: Transport,

    /// Host to bind to (http mode only)
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to (http mode only)
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    mcp_common::init_tracing("pushover_mcp", cli.verbose)?;

    let server = PushoverMcpServer::from_env()?;

    let options = ServeOptions {
        transport: cli.transport,
        host: cli.host,
        port: cli.port,
    };

    mcp_common::serve(server, "pushover-mcp", &options).await
}
