//! Banking ledger HTTP server

use std::sync::Arc;

use banking_ledger::api::create_router;
use banking_ledger::config::AppConfig;
use banking_ledger::{telemetry, Ledger};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_result = AppConfig::from_env();
    let log_format = config_result
        .as_ref()
        .map(|config| config.log_format)
        .unwrap_or_default();
    telemetry::init(log_format)?;

    let config = match config_result {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load configuration from environment: {e}");
            tracing::info!("Using default configuration");
            AppConfig::default()
        }
    };

    let ledger = Arc::new(Ledger::with_id_generator(config.id_strategy.generator()));
    let app = create_router(ledger).layer(TraceLayer::new_for_http());

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(
        id_strategy = ?config.id_strategy,
        "Banking ledger listening on http://{bind_address}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Banking ledger stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
