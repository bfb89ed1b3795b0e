use std::sync::Arc;

use avdash_adapter_jap_http::JapHttpClient;
use avdash_app::status_poller;
use avdashd::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Devices
    let roster = config.roster()?;
    tracing::info!(devices = roster.devices().len(), "roster loaded");
    let control = JapHttpClient::new(config.device_http.clone())?;

    // Services
    let state = avdashd::wire(
        control,
        roster,
        config.throttle(),
        config.dashboard_settings(),
    );
    let poller = status_poller::spawn(
        Arc::clone(&state.roster_service),
        config.status_interval(),
    );

    // HTTP
    let app = avdash_adapter_http_axum::router::build(state);
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "avdashd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.abort();
    tracing::info!("avdashd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
