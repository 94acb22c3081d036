use anyhow::Result;
use solar_quote::{api, config::Config, state::AppState, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let cfg = Config::load()?;

    let app_state = AppState::from_config(&cfg).await?;
    let app = api::router(app_state, &cfg.server);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!("server binding to 0.0.0.0 - the API is reachable from the network");
    }

    info!(
        %addr,
        include_battery_savings = cfg.calculation.include_battery_savings,
        "starting solar quote service"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
