mod api;
mod config;
mod error;
mod main_lib;
mod scheduler;

use api::app_router;
use config::Config;
use main_lib::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    // Start the background valuation scheduler (15-minute interval by default)
    scheduler::start_valuation_scheduler(state.clone(), config.valuation_interval_secs);

    let router = app_router(state);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
