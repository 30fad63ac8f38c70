//! Binary entrypoint for the parking API server.
use anyhow::Context;
use parking_api::{run, AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    let lot = config.lot().context("loading lot configuration")?;
    let engine = lot.build().context("building parking lot")?;
    let state = AppState::new(engine).context("registering metrics")?;

    run(&config.addr, state)
        .await
        .with_context(|| format!("serving on {}", config.addr))
}
