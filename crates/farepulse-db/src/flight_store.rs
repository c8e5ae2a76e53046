//! Flight persistence: lookups, horizon queries, and demand-level updates.
//!
//! The simulator and the API both read flights through this store. Demand
//! level updates are transaction-scoped so a flight's seat flips and its
//! escalation commit (or roll back) together.

use chrono::{DateTime, Utc};
use farepulse_types::{DemandLevel, FlightId, FlightSnapshot, FlightStatus, SeatCounts};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `flights` table.
pub struct FlightStore<'a> {
    pool: &'a PgPool,
}

impl<'a> FlightStore<'a> {
    /// Create a new flight store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a flight row. Used by seeding and tests.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn insert(&self, flight: &NewFlight) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO flights (id, flight_number, departure_time, arrival_time, base_fare, demand_level, status)
              VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(flight.id.into_inner())
        .bind(&flight.flight_number)
        .bind(flight.departure_time)
        .bind(flight.arrival_time)
        .bind(flight.base_fare)
        .bind(flight.demand_level.as_str())
        .bind(flight.status.as_str())
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Fetch a single flight by ID.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get(&self, flight_id: FlightId) -> Result<Option<FlightRow>, DbError> {
        let row = sqlx::query_as::<_, FlightRow>(
            r"SELECT id, flight_number, departure_time, arrival_time, base_fare, demand_level, status
              FROM flights
              WHERE id = $1",
        )
        .bind(flight_id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Fetch flights departing within `[from, to]`, soonest first.
    ///
    /// `limit` bounds the result so a simulation pass over a large flight
    /// set stays bounded; the soonest departures win when the cap bites.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn departing_within(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<FlightRow>, DbError> {
        let rows = sqlx::query_as::<_, FlightRow>(
            r"SELECT id, flight_number, departure_time, arrival_time, base_fare, demand_level, status
              FROM flights
              WHERE departure_time >= $1 AND departure_time <= $2
              ORDER BY departure_time ASC
              LIMIT $3",
        )
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Update a flight's demand level inside an open transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the update fails.
    pub async fn set_demand_level_in_tx(
        conn: &mut PgConnection,
        flight_id: FlightId,
        level: DemandLevel,
    ) -> Result<(), DbError> {
        sqlx::query(r"UPDATE flights SET demand_level = $1 WHERE id = $2")
            .bind(level.as_str())
            .bind(flight_id.into_inner())
            .execute(conn)
            .await?;
        Ok(())
    }
}

/// A new flight to insert.
#[derive(Debug, Clone)]
pub struct NewFlight {
    /// Flight identifier.
    pub id: FlightId,
    /// Marketing flight number.
    pub flight_number: String,
    /// Scheduled departure (UTC).
    pub departure_time: DateTime<Utc>,
    /// Scheduled arrival (UTC).
    pub arrival_time: DateTime<Utc>,
    /// Base fare before multipliers.
    pub base_fare: Decimal,
    /// Initial demand level.
    pub demand_level: DemandLevel,
    /// Initial status.
    pub status: FlightStatus,
}

/// A row from the `flights` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FlightRow {
    /// Flight UUID.
    pub id: Uuid,
    /// Marketing flight number.
    pub flight_number: String,
    /// Scheduled departure (UTC).
    pub departure_time: DateTime<Utc>,
    /// Scheduled arrival (UTC).
    pub arrival_time: DateTime<Utc>,
    /// Base fare before multipliers.
    pub base_fare: Decimal,
    /// Demand level as stored (lowercase string).
    pub demand_level: String,
    /// Status as stored (lowercase string).
    pub status: String,
}

impl FlightRow {
    /// The flight's typed identifier.
    pub const fn flight_id(&self) -> FlightId {
        FlightId(self.id)
    }

    /// Parse the stored demand level, degrading unknown values to medium.
    pub fn demand_level(&self) -> DemandLevel {
        DemandLevel::parse_lossy(&self.demand_level)
    }

    /// Parse the stored status, degrading unknown values to scheduled.
    pub fn status(&self) -> FlightStatus {
        FlightStatus::parse_lossy(&self.status)
    }

    /// Combine the row with seat counts into a pricing snapshot.
    ///
    /// Both halves should come from the same read so the snapshot is
    /// internally consistent; the caller owns that pairing.
    pub fn snapshot(&self, counts: SeatCounts) -> FlightSnapshot {
        FlightSnapshot {
            id: self.flight_id(),
            flight_number: self.flight_number.clone(),
            departure_time: self.departure_time,
            base_fare: self.base_fare,
            demand_level: self.demand_level(),
            status: self.status(),
            total_seats: counts.total,
            booked_seats: counts.booked(),
        }
    }
}
