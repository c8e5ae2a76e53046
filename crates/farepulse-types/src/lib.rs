//! Shared type definitions for the FarePulse pricing engine.
//!
//! This crate is the single source of truth for all types used across the
//! FarePulse workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the booking dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`enums`] -- Demand levels, fare tiers, flight status
//! - [`structs`] -- Value snapshots (flights, seat counts, quotes, records)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{DemandLevel, FareTier, FlightStatus};
pub use ids::{FareRecordId, FlightId, SeatId};
pub use structs::{FareRecord, FlightSnapshot, PriceQuote, SeatCounts, SimulationOutcome};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::FlightId::export_all();
        let _ = crate::ids::SeatId::export_all();
        let _ = crate::ids::FareRecordId::export_all();

        // Enums
        let _ = crate::enums::DemandLevel::export_all();
        let _ = crate::enums::FareTier::export_all();
        let _ = crate::enums::FlightStatus::export_all();

        // Structs
        let _ = crate::structs::FlightSnapshot::export_all();
        let _ = crate::structs::SeatCounts::export_all();
        let _ = crate::structs::PriceQuote::export_all();
        let _ = crate::structs::FareRecord::export_all();
        let _ = crate::structs::SimulationOutcome::export_all();
    }
}
