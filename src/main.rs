use anyhow::Result;
use home_energy_dashboard::{api, config::Config, controller, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;
    telemetry::init_tracing(&cfg.log);

    match cfg.simulation.random_seed {
        Some(seed) => info!(seed, "simulation seeded, output is reproducible"),
        None => info!("simulation unseeded"),
    }

    let app_state = controller::AppState::new(cfg.clone());
    let app = api::router(app_state.clone());

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!("server binding to 0.0.0.0 - dashboard API will be reachable from the network");
    }

    info!(%addr, "starting Home Energy Dashboard");

    let meter_task = controller::spawn_controller_tasks(app_state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    meter_task.abort();
    warn!("shutdown complete");
    Ok(())
}
