//! Hermes web server.
//!
//! Parses the topic ARN, resolves its region, and serves:
//! - `POST /event`: forward the body to SNS
//! - `GET /metrics`: Prometheus counters
//! - `GET /health`: liveness

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hermes::{router, AppState, Config, Metrics, SnsPublisher};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    let topic = match config.topic_arn() {
        Ok(topic) => topic,
        Err(e) => {
            error!(error = %e, "invalid_topic_arn");
            return Err(e).context("Could not infer AWS region from ARN");
        }
    };

    info!(
        region = %topic.region(),
        topic_arn = %topic,
        debug = config.debug,
        "starting_webhook_service"
    );

    let metrics = Metrics::new().context("Failed to register metrics")?;
    let publisher = SnsPublisher::new(topic.region(), config.endpoint_url.as_deref()).await;

    let state = AppState::new(topic, Arc::new(publisher), metrics).with_config(&config);
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
