//! Seat persistence: consistent availability counts and booking flips.
//!
//! Booking selects the N lowest-identifier available seats (UUID v7 IDs
//! are time-ordered, so the order is stable) and locks them `FOR UPDATE`,
//! which keeps two concurrent simulation passes from flipping the same
//! seat twice.

use farepulse_types::{FlightId, SeatCounts, SeatId};
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `seats` table.
pub struct SeatStore<'a> {
    pool: &'a PgPool,
}

impl<'a> SeatStore<'a> {
    /// Create a new seat store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create one available seat row per seat number for a flight.
    /// Used by seeding and tests.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn create_seats(
        &self,
        flight_id: FlightId,
        seat_numbers: &[String],
    ) -> Result<(), DbError> {
        if seat_numbers.is_empty() {
            return Ok(());
        }

        // Seat IDs are generated app-side so inserts in one batch keep
        // their relative time-ordering.
        let ids: Vec<Uuid> = seat_numbers.iter().map(|_| SeatId::new().into_inner()).collect();
        let flight_ids: Vec<Uuid> = seat_numbers.iter().map(|_| flight_id.into_inner()).collect();

        sqlx::query(
            r"INSERT INTO seats (id, flight_id, seat_number, is_available)
              SELECT id, flight_id, seat_number, TRUE
              FROM UNNEST($1::UUID[], $2::UUID[], $3::TEXT[]) AS t (id, flight_id, seat_number)",
        )
        .bind(&ids)
        .bind(&flight_ids)
        .bind(seat_numbers)
        .execute(self.pool)
        .await?;

        tracing::debug!(
            flight_id = %flight_id,
            count = seat_numbers.len(),
            "Created seats"
        );
        Ok(())
    }

    /// Total and available seat counts for a flight, from one query so the
    /// two numbers are mutually consistent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn counts(&self, flight_id: FlightId) -> Result<SeatCounts, DbError> {
        let mut conn = self.pool.acquire().await?;
        Self::counts_on(&mut conn, flight_id).await
    }

    /// Seat counts read inside an open transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn counts_in_tx(
        conn: &mut PgConnection,
        flight_id: FlightId,
    ) -> Result<SeatCounts, DbError> {
        Self::counts_on(conn, flight_id).await
    }

    async fn counts_on(
        conn: &mut PgConnection,
        flight_id: FlightId,
    ) -> Result<SeatCounts, DbError> {
        let row = sqlx::query(
            r"SELECT COUNT(*) AS total,
                     COUNT(*) FILTER (WHERE is_available) AS available
              FROM seats
              WHERE flight_id = $1",
        )
        .bind(flight_id.into_inner())
        .fetch_one(conn)
        .await?;

        let total: i64 = row.try_get("total")?;
        let available: i64 = row.try_get("available")?;

        Ok(SeatCounts {
            total: u32::try_from(total).unwrap_or(u32::MAX),
            available: u32::try_from(available).unwrap_or(u32::MAX),
        })
    }

    /// Flip up to `count` available seats to booked, lowest seat ID first,
    /// inside an open transaction. Returns the number actually flipped
    /// (less than `count` when availability runs out).
    ///
    /// The inner select locks the chosen rows `FOR UPDATE`, so a
    /// concurrent pass blocks rather than double-booking.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the update fails.
    pub async fn book_lowest_available_in_tx(
        conn: &mut PgConnection,
        flight_id: FlightId,
        count: u32,
    ) -> Result<u32, DbError> {
        if count == 0 {
            return Ok(0);
        }

        let result = sqlx::query(
            r"UPDATE seats
              SET is_available = FALSE
              WHERE id IN (
                  SELECT id FROM seats
                  WHERE flight_id = $1 AND is_available
                  ORDER BY id ASC
                  LIMIT $2
                  FOR UPDATE
              )",
        )
        .bind(flight_id.into_inner())
        .bind(i64::from(count))
        .execute(conn)
        .await?;

        Ok(u32::try_from(result.rows_affected()).unwrap_or(u32::MAX))
    }

    /// Seat rows for a flight, lowest ID first. Used by tests and seeding
    /// checks.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list(&self, flight_id: FlightId) -> Result<Vec<SeatRow>, DbError> {
        let rows = sqlx::query_as::<_, SeatRow>(
            r"SELECT id, flight_id, seat_number, is_available
              FROM seats
              WHERE flight_id = $1
              ORDER BY id ASC",
        )
        .bind(flight_id.into_inner())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

/// A row from the `seats` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SeatRow {
    /// Seat UUID.
    pub id: Uuid,
    /// Owning flight UUID.
    pub flight_id: Uuid,
    /// Cabin seat number, e.g. `12C`.
    pub seat_number: String,
    /// Whether the seat can still be booked.
    pub is_available: bool,
}
