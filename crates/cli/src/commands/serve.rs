//! Serve command handler.

use std::net::SocketAddr;
use std::sync::Arc;

use agrigenius_core::config::AppConfig;
use agrigenius_pipeline::build_pipeline;
use anyhow::Context;
use clap::Args;

use crate::server::{router, AppState};

/// Run the HTTP server
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Address to bind (overrides server.host)
    #[arg(long, env = "AGRIGENIUS_HOST")]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(long, env = "AGRIGENIUS_PORT")]
    pub port: Option<u16>,
}

impl ServeCommand {
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        let host = self.host.as_deref().unwrap_or(&config.server.host);
        let port = self.port.unwrap_or(config.server.port);
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

        let pipeline = build_pipeline(config)
            .await
            .context("Failed to start the assistant")?;
        let mode = pipeline.capabilities().mode();
        let state = AppState {
            pipeline: Arc::new(pipeline),
        };

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(%addr, mode, "AgriGenius server listening");

        axum::serve(listener, router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
