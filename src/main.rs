//! Roulette strategy simulator.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! plays one session with the configured strategy, exports the trajectory
//! as CSV, renders the balance chart and optionally serves the dashboard.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use roulette::config::{AppConfig, DEFAULT_CONFIG_FILE};
use roulette::dashboard::{self, chart, DashboardState};
use roulette::engine::rng::RngSource;
use roulette::engine::RoundEngine;
use roulette::storage;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path =
        std::env::var("ROULETTE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let mut cfg = AppConfig::load_or_default(&config_path)?;
    cfg.apply_env_overrides()
        .context("Invalid ROULETTE_* environment override")?;

    let sim = cfg.simulation_config()?;
    sim.validate_for_output()?;

    // -- Simulate ----------------------------------------------------------

    let mut source = RngSource::from_seed(sim.seed);
    let run = RoundEngine::new().run(&sim, &mut source)?;

    // -- Output ------------------------------------------------------------

    let rows = storage::export_csv(&run, Some(&cfg.output.csv_path))?;
    chart::write_svg(&run, &cfg.output.chart_path)?;

    info!(
        run_id = %run.id,
        strategy = %run.config.strategy,
        rows,
        end_balance = %run.final_balance().normalize(),
        pnl = %run.pnl().normalize(),
        chart = %cfg.output.chart_path,
        "Run finished"
    );
    println!("Wrote simulation results to {}", cfg.output.csv_path);

    if cfg.dashboard.enabled {
        let state = Arc::new(DashboardState::new(run));
        dashboard::serve(state, cfg.dashboard.port).await?;
    }

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("roulette=info"));

    let json_logging = std::env::var("ROULETTE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
