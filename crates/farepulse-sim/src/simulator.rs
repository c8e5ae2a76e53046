//! The demand simulator: one pass books seats and escalates demand across
//! every flight departing within a horizon.
//!
//! # Pass shape
//!
//! For each eligible flight (departure within `[now, now + within_hours]`,
//! soonest first, capped at `max_flights_per_pass`):
//!
//! 1. Draw this tick's booking count from the core demand math, using the
//!    simulator's seeded generator.
//! 2. Open a transaction; read seat counts, flip `min(draw, available)`
//!    lowest-ID seats, apply the escalation rule, commit.
//! 3. On any error, roll back and move to the next flight -- one bad
//!    flight never aborts the pass.
//!
//! The per-flight transaction is the consistency boundary: a concurrent
//! price read sees the pre- or post-step state, never a partial seat flip,
//! and a pass can be cancelled between flights without corruption.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use farepulse_core::demand;
use farepulse_db::{FlightRow, FlightStore, PostgresPool, SeatStore};
use farepulse_types::{DemandLevel, FlightId, FlightStatus, SimulationOutcome};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::SimError;

/// Stateless-per-pass demand simulator over the flight roster.
///
/// The only state held between passes is the random generator, so a fixed
/// seed reproduces the exact booking sequence across a test run.
pub struct DemandSimulator {
    pool: PostgresPool,
    rng: Mutex<StdRng>,
    max_flights_per_pass: i64,
}

/// What one flight's step did. Internal accounting for the pass.
#[derive(Debug, Clone, Copy)]
struct StepReport {
    /// Seats flipped from available to booked.
    seats_booked: u32,
    /// The level the flight escalated to, if it did.
    escalated_to: Option<DemandLevel>,
}

impl DemandSimulator {
    /// Create a simulator over the given pool.
    ///
    /// `seed` fixes the booking draws for reproducibility; `None` seeds
    /// from system entropy. `max_flights_per_pass` bounds each pass.
    pub fn new(pool: PostgresPool, seed: Option<u64>, max_flights_per_pass: i64) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            pool,
            rng: Mutex::new(rng),
            max_flights_per_pass,
        }
    }

    /// Run one simulation pass over all flights departing within
    /// `within_hours` of now.
    ///
    /// Returns the pass outcome: flights whose step committed, flights
    /// skipped after an error, and total seats booked. A single flight's
    /// failure is logged and skipped; only a failure to enumerate the
    /// eligible flights fails the whole pass.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidHorizon`] if `within_hours` does not fit
    /// in a time delta, or [`SimError::Db`] if the flight query fails.
    pub async fn run_once(&self, within_hours: i64) -> Result<SimulationOutcome, SimError> {
        let now = Utc::now();
        let horizon = TimeDelta::try_hours(within_hours)
            .ok_or(SimError::InvalidHorizon { hours: within_hours })?;
        let cutoff = now
            .checked_add_signed(horizon)
            .ok_or(SimError::InvalidHorizon { hours: within_hours })?;

        let flights = FlightStore::new(self.pool.pool())
            .departing_within(now, cutoff, self.max_flights_per_pass)
            .await?;

        tracing::info!(
            within_hours,
            eligible = flights.len(),
            "Starting demand simulation pass"
        );

        let mut outcome = SimulationOutcome::default();
        // Only scheduled (and delayed, still bookable) flights take
        // bookings; cancelled and departed flights are left alone.
        for flight in flights
            .iter()
            .filter(|f| matches!(f.status(), FlightStatus::Scheduled | FlightStatus::Delayed))
        {
            match self.step_flight(flight, now).await {
                Ok(report) => {
                    outcome.flights_updated = outcome.flights_updated.saturating_add(1);
                    outcome.seats_booked =
                        outcome.seats_booked.saturating_add(report.seats_booked);
                    if let Some(level) = report.escalated_to {
                        tracing::info!(
                            flight_id = %flight.flight_id(),
                            level = %level,
                            "Demand escalated"
                        );
                    }
                }
                Err(error) => {
                    // One bad flight must not abort the batch; its
                    // transaction has already rolled back.
                    outcome.flights_skipped = outcome.flights_skipped.saturating_add(1);
                    tracing::warn!(
                        flight_id = %flight.flight_id(),
                        error = %error,
                        "Flight simulation step failed; skipping"
                    );
                }
            }
        }

        tracing::info!(
            flights_updated = outcome.flights_updated,
            flights_skipped = outcome.flights_skipped,
            seats_booked = outcome.seats_booked,
            "Demand simulation pass complete"
        );
        Ok(outcome)
    }

    /// Apply one simulation step to a single flight.
    ///
    /// Seat flips and the demand-level change share one transaction, so a
    /// failure at any point leaves the flight exactly as it was.
    async fn step_flight(
        &self,
        flight: &FlightRow,
        now: DateTime<Utc>,
    ) -> Result<StepReport, SimError> {
        let flight_id: FlightId = flight.flight_id();
        let level = flight.demand_level();

        // The draw happens outside the transaction: it depends only on the
        // demand level and departure proximity, not on seat counts.
        let plan = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            demand::plan_bookings(level, flight.departure_time, now, &mut *rng)
        };

        let mut tx = self.pool.pool().begin().await.map_err(farepulse_db::DbError::from)?;

        let counts = SeatStore::counts_in_tx(&mut tx, flight_id).await?;
        let to_book = plan.requested.min(counts.available);
        let seats_booked =
            SeatStore::book_lowest_available_in_tx(&mut tx, flight_id, to_book).await?;

        let booked_after = counts.booked().saturating_add(seats_booked);
        let escalated_to = demand::escalated_level(level, counts.total, booked_after);
        if let Some(next) = escalated_to {
            FlightStore::set_demand_level_in_tx(&mut tx, flight_id, next).await?;
        }

        tx.commit().await.map_err(farepulse_db::DbError::from)?;

        tracing::debug!(
            flight_id = %flight_id,
            requested = plan.requested,
            seats_booked,
            available_before = counts.available,
            "Simulated flight step"
        );

        Ok(StepReport {
            seats_booked,
            escalated_to,
        })
    }
}
