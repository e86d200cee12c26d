mod buckets;
mod client;
mod config;
mod credentials;
mod error;
mod influx_check;
mod proxy;
mod schemas;
mod state;
mod store;

use config::Config;
use state::AppState;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var("FLUXVISION_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let cfg = Config::load(&config_path)?;

    let state = Arc::new(AppState::from_config(&cfg)?);
    let app = proxy::router(state);

    let listen = cfg
        .listen
        .unwrap_or_else(|| config::DEFAULT_LISTEN.into());
    let addr: SocketAddr = listen.parse()?;
    info!(%addr, "Starting fluxvision-backend");

    let server = axum::Server::bind(&addr).serve(app.into_make_service());

    let graceful = server.with_graceful_shutdown(shutdown_signal());
    graceful.await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("Shutdown signal received");
}
