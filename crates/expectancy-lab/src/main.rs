mod config;
mod wiring;

use std::error::Error;

use api::AppState;
use runtime::SimulationHandle;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = config::Config::from_env()?;
    let sim = SimulationHandle::new(config.session_config());
    info!(
        win_pct = config.profile.win_pct,
        reward_multiple = config.profile.reward_multiple,
        loss_multiple = config.profile.loss_multiple,
        risk_pct = config.risk_pct,
        interval_ms = config.interval_ms,
        seed = ?config.seed,
        "session configured"
    );
    if config.autostart {
        sim.start()?;
    }

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "expectancy lab listening");

    axum::serve(listener, wiring::build_app(AppState::new(sim))).await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
