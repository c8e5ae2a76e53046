//! Core value snapshots exchanged between the storage layer, the pricing
//! function, and the demand simulator.
//!
//! The engine never owns flight or seat state — it consumes snapshots read
//! fresh from storage on each call and emits values the caller persists.
//! Staleness is the caller's responsibility.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DemandLevel, FareTier, FlightStatus};
use crate::ids::{FareRecordId, FlightId};

/// Point-in-time view of a flight as the pricing engine sees it.
///
/// Invariant: `booked_seats <= total_seats`. The storage layer derives both
/// counts from the same seat query so the invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FlightSnapshot {
    /// Flight identifier.
    pub id: FlightId,
    /// Marketing flight number, e.g. `FP204`.
    pub flight_number: String,
    /// Scheduled departure (UTC).
    pub departure_time: DateTime<Utc>,
    /// Base fare before any multiplier is applied.
    #[ts(as = "String")]
    pub base_fare: Decimal,
    /// Current demand level.
    pub demand_level: DemandLevel,
    /// Operational status.
    pub status: FlightStatus,
    /// Total seats on the aircraft.
    pub total_seats: u32,
    /// Seats already booked.
    pub booked_seats: u32,
}

impl FlightSnapshot {
    /// Seats still available for booking.
    ///
    /// Saturating: a snapshot violating the booked-within-total invariant
    /// reads as zero availability rather than wrapping.
    pub const fn remaining_seats(&self) -> u32 {
        self.total_seats.saturating_sub(self.booked_seats)
    }
}

/// Seat counts for one flight, read in a single consistent query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeatCounts {
    /// Total seats on the flight.
    pub total: u32,
    /// Seats currently available.
    pub available: u32,
}

impl SeatCounts {
    /// Seats already booked (`total - available`, saturating).
    pub const fn booked(self) -> u32 {
        self.total.saturating_sub(self.available)
    }
}

/// A computed price for one flight and tier.
///
/// Derived, not persisted by the engine. The API layer records quotes as
/// fare-history rows; other callers may discard them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PriceQuote {
    /// Flight the quote applies to.
    pub flight_id: FlightId,
    /// Fare tier the quote was computed for.
    pub tier: FareTier,
    /// Final price, rounded to 2 decimal places.
    #[ts(as = "String")]
    pub price: Decimal,
    /// Seats still available when the quote was computed.
    pub remaining_seats: u32,
    /// Demand level at quote time.
    pub demand_level: DemandLevel,
    /// When the quote was computed (UTC).
    pub computed_at: DateTime<Utc>,
}

/// One persisted fare-history row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FareRecord {
    /// Record identifier.
    pub id: FareRecordId,
    /// Flight the price was quoted for.
    pub flight_id: FlightId,
    /// When the quote was recorded (UTC).
    pub recorded_at: DateTime<Utc>,
    /// Fare tier of the quote.
    pub tier: FareTier,
    /// Quoted price.
    #[ts(as = "String")]
    pub price: Decimal,
    /// Seats remaining at quote time.
    pub remaining_seats: u32,
    /// Demand level at quote time.
    pub demand_level: DemandLevel,
}

/// Result of one demand-simulation pass.
///
/// Transient return value; nothing persists it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimulationOutcome {
    /// Flights whose step committed successfully.
    pub flights_updated: u32,
    /// Flights skipped because their step failed (logged, not fatal).
    pub flights_skipped: u32,
    /// Total seats flipped from available to booked across the pass.
    pub seats_booked: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot(total: u32, booked: u32) -> FlightSnapshot {
        FlightSnapshot {
            id: FlightId::new(),
            flight_number: String::from("FP204"),
            departure_time: Utc::now(),
            base_fare: Decimal::new(100_000, 2),
            demand_level: DemandLevel::Medium,
            status: FlightStatus::Scheduled,
            total_seats: total,
            booked_seats: booked,
        }
    }

    #[test]
    fn remaining_seats_subtracts() {
        assert_eq!(snapshot(100, 30).remaining_seats(), 70);
    }

    #[test]
    fn remaining_seats_saturates_on_bad_snapshot() {
        assert_eq!(snapshot(10, 25).remaining_seats(), 0);
    }

    #[test]
    fn seat_counts_booked() {
        let counts = SeatCounts {
            total: 180,
            available: 42,
        };
        assert_eq!(counts.booked(), 138);
    }

    #[test]
    fn quote_serializes_with_lowercase_enums() {
        let quote = PriceQuote {
            flight_id: FlightId::new(),
            tier: FareTier::Business,
            price: Decimal::new(94_500, 2),
            remaining_seats: 12,
            demand_level: DemandLevel::High,
            computed_at: Utc::now(),
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["tier"], "business");
        assert_eq!(json["demand_level"], "high");
    }
}
