//! Shared application state for the API server.
//!
//! [`AppState`] holds the `PostgreSQL` pool and the demand simulator.
//! Handlers read flights, seats, and fare history fresh from storage on
//! every request — prices are never cached, so a quote always reflects
//! the latest committed seat counts and demand level.

use std::sync::Arc;

use farepulse_db::{FareStore, FlightStore, PostgresPool, SeatStore};
use farepulse_sim::DemandSimulator;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// `PostgreSQL` connection pool shared by all handlers.
    pub pool: PostgresPool,
    /// The demand simulator, shared with the periodic scheduler.
    pub simulator: Arc<DemandSimulator>,
    /// Default horizon in hours for flight listings and simulation passes.
    pub default_within_hours: i64,
}

impl AppState {
    /// Create the application state.
    pub const fn new(
        pool: PostgresPool,
        simulator: Arc<DemandSimulator>,
        default_within_hours: i64,
    ) -> Self {
        Self {
            pool,
            simulator,
            default_within_hours,
        }
    }

    /// Flight store bound to the shared pool.
    pub const fn flights(&self) -> FlightStore<'_> {
        FlightStore::new(self.pool.pool())
    }

    /// Seat store bound to the shared pool.
    pub const fn seats(&self) -> SeatStore<'_> {
        SeatStore::new(self.pool.pool())
    }

    /// Fare-history store bound to the shared pool.
    pub const fn fares(&self) -> FareStore<'_> {
        FareStore::new(self.pool.pool())
    }
}
