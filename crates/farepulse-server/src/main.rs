//! FarePulse server binary.
//!
//! This is the main entry point that wires together the database pool,
//! the demand simulator, the periodic simulation scheduler, and the HTTP
//! API. It loads configuration, initializes all subsystems, and serves
//! until the process is terminated.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `farepulse.yaml`
//! 3. Connect to `PostgreSQL` and run migrations
//! 4. Create the demand simulator
//! 5. Start the periodic simulation scheduler (if enabled)
//! 6. Serve the HTTP API

mod error;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use farepulse_api::AppState;
use farepulse_core::config::FarePulseConfig;
use farepulse_db::{PostgresConfig, PostgresPool};
use farepulse_sim::DemandSimulator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::FarePulseError;

/// Application entry point for the FarePulse server.
///
/// Initializes all subsystems and serves the HTTP API. Returns an error
/// code on failure.
///
/// # Errors
///
/// Returns an error if any initialization step or the server itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("farepulse-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        within_hours = config.simulation.within_hours,
        interval_secs = config.simulation.interval_secs,
        "Configuration loaded"
    );

    // 3. Connect to PostgreSQL and run migrations.
    let pg_config = PostgresConfig::new(&config.database.url)
        .with_max_connections(config.database.max_connections);
    let pool = PostgresPool::connect(&pg_config).await.map_err(FarePulseError::from)?;
    pool.run_migrations().await.map_err(FarePulseError::from)?;

    // 4. Create the demand simulator.
    let simulator = Arc::new(DemandSimulator::new(
        pool.clone(),
        config.simulation.seed,
        config.simulation.max_flights_per_pass,
    ));
    info!(
        seed = ?config.simulation.seed,
        max_flights_per_pass = config.simulation.max_flights_per_pass,
        "Demand simulator created"
    );

    // 5. Start the periodic simulation scheduler.
    if config.simulation.interval_secs > 0 {
        spawn_scheduler(
            Arc::clone(&simulator),
            config.simulation.within_hours,
            config.simulation.interval_secs,
        );
        info!(
            interval_secs = config.simulation.interval_secs,
            "Simulation scheduler started"
        );
    } else {
        info!("Simulation scheduler disabled (interval_secs = 0)");
    }

    // 6. Serve the HTTP API.
    let state = Arc::new(AppState::new(
        pool,
        simulator,
        config.simulation.within_hours,
    ));
    farepulse_api::start_server(&config.server, state)
        .await
        .map_err(FarePulseError::from)?;

    info!("farepulse-server shutdown complete");
    Ok(())
}

/// Load the configuration from `farepulse.yaml`.
///
/// The `FAREPULSE_CONFIG` environment variable overrides the path. If no
/// config file exists, defaults are used (with `DATABASE_URL` still
/// applied from the environment).
fn load_config() -> Result<FarePulseConfig, FarePulseError> {
    let path_override = std::env::var("FAREPULSE_CONFIG").ok();
    let path = path_override
        .as_deref()
        .map_or_else(|| Path::new("farepulse.yaml"), Path::new);

    if path.exists() {
        let config = FarePulseConfig::from_file(path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        let mut config = FarePulseConfig::default();
        config.database.apply_env_overrides();
        Ok(config)
    }
}

/// Spawn the background task that runs a simulation pass on a fixed
/// interval.
///
/// The first pass runs immediately; subsequent passes are spaced
/// `interval_secs` apart. A failed pass is logged and the schedule
/// continues.
fn spawn_scheduler(simulator: Arc<DemandSimulator>, within_hours: i64, interval_secs: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match simulator.run_once(within_hours).await {
                Ok(outcome) => {
                    info!(
                        flights_updated = outcome.flights_updated,
                        flights_skipped = outcome.flights_skipped,
                        seats_booked = outcome.seats_booked,
                        "Scheduled simulation pass complete"
                    );
                }
                Err(error) => {
                    tracing::warn!(%error, "Scheduled simulation pass failed");
                }
            }
        }
    });
}
