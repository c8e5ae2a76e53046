//! Fare-history persistence.
//!
//! Every served price quote is appended here so the dashboard can chart
//! how a flight's price moved as seats filled and demand escalated. The
//! engine only emits the values; this store is the caller that persists
//! them.

use chrono::{DateTime, Utc};
use farepulse_types::{FareRecordId, FlightId, PriceQuote};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `fare_history` table.
pub struct FareStore<'a> {
    pool: &'a PgPool,
}

impl<'a> FareStore<'a> {
    /// Create a new fare store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a quote as a fare-history row. Returns the new record ID.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn record(&self, quote: &PriceQuote) -> Result<FareRecordId, DbError> {
        let id = FareRecordId::new();

        sqlx::query(
            r"INSERT INTO fare_history (id, flight_id, recorded_at, tier, price, remaining_seats, demand_level)
              VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id.into_inner())
        .bind(quote.flight_id.into_inner())
        .bind(quote.computed_at)
        .bind(quote.tier.as_str())
        .bind(quote.price)
        .bind(i64::from(quote.remaining_seats))
        .bind(quote.demand_level.as_str())
        .execute(self.pool)
        .await?;

        tracing::debug!(flight_id = %quote.flight_id, tier = %quote.tier, price = %quote.price, "Recorded fare");
        Ok(id)
    }

    /// Fetch the most recent fare records for a flight, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn history(
        &self,
        flight_id: FlightId,
        limit: i64,
    ) -> Result<Vec<FareRow>, DbError> {
        let rows = sqlx::query_as::<_, FareRow>(
            r"SELECT id, flight_id, recorded_at, tier, price, remaining_seats, demand_level
              FROM fare_history
              WHERE flight_id = $1
              ORDER BY recorded_at DESC
              LIMIT $2",
        )
        .bind(flight_id.into_inner())
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

/// A row from the `fare_history` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FareRow {
    /// Record UUID.
    pub id: Uuid,
    /// Flight the price was quoted for.
    pub flight_id: Uuid,
    /// When the quote was recorded (UTC).
    pub recorded_at: DateTime<Utc>,
    /// Fare tier as stored (snake_case string).
    pub tier: String,
    /// Quoted price.
    pub price: Decimal,
    /// Seats remaining at quote time.
    pub remaining_seats: i64,
    /// Demand level as stored (lowercase string).
    pub demand_level: String,
}
