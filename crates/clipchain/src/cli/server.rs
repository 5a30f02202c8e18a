//! `serve` command.

use anyhow::{Context, Result};
use clipchain::{ApiState, ClipchainConfig, Pipeline, create_router};
use std::sync::Arc;
use tracing::info;

/// Serve the HTTP API until interrupted.
pub async fn serve(config: ClipchainConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }

    for dir in [&config.paths.temp_dir, &config.paths.output_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let pipeline = Arc::new(Pipeline::from_config(&config)?);
    let router = create_router(ApiState::new(pipeline), &config.paths.output_dir);

    let addr = server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
