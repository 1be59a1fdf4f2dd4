//! Daemon entry point for the yfin MCP server.
//!
//! Loads configuration from CLI arguments and the environment, builds the
//! Yahoo Finance provider, and serves MCP over stdio and/or streamable HTTP.

mod config;
mod logging;

use tracing::info;
use yfin_core::control::YfinControlPlane;
use yfin_core::provider::YahooProvider;
use yfin_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};

use crate::config::YfinConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = YfinConfig::from_args()?;
    logging::init_tracing(&config.log_filter);

    let provider = YahooProvider::new(config.yahoo_config())?;
    let control = YfinControlPlane::new(provider);
    info!(
        base_url = %config.query_base_url,
        stdio = config.enable_stdio,
        http = config.http_serve,
        "starting yfin-mcpd"
    );

    let http = config.http_serve.then(|| {
        let control = control.clone();
        let http_config = McpHttpServerConfig::new(config.http_addr);
        tokio::spawn(serve_streamable_http(control, http_config))
    });

    if config.enable_stdio {
        serve_stdio(control).await?;
        if let Some(http) = http {
            info!("stdio closed, stopping HTTP transport");
            http.abort();
        }
    } else if let Some(http) = http {
        http.await??;
    }
    Ok(())
}
