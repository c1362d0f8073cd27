use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use codeshell::ai::{AiGateway, HttpModelTransport, ModelTransport};
use codeshell::config::{Cli, ServerConfig};
use codeshell::server::{self, AppState};

mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_cli(Cli::parse())?;
    let _logging = logging::init(config.log_dir.as_deref());

    let transport = HttpModelTransport::new(&config.base_url, &config.model, &config.api_key)
        .context("building model transport")?;
    tracing::info!(endpoint = transport.endpoint(), "model transport ready");
    let transport: Arc<dyn ModelTransport> = Arc::new(transport);
    let gateway = AiGateway::new(transport).with_max_input_chars(config.max_input_chars);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    server::serve(listener, AppState::new(gateway), shutdown_signal())
        .await
        .context("serving ai proxy")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
