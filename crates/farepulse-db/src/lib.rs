//! Data layer for the FarePulse pricing engine (`PostgreSQL`).
//!
//! All durable state lives in `PostgreSQL`: the flight roster, per-flight
//! seat maps, and the fare-history log. The pricing function and the
//! demand simulator consume value snapshots read through these stores and
//! hand mutations back to them; neither holds state of its own.
//!
//! # Consistency
//!
//! One simulation step per flight runs inside a single transaction: seat
//! flips and the demand-level escalation commit together or not at all.
//! Seat booking locks its rows `FOR UPDATE`, so readers see either the
//! pre- or post-step state, never a partial flip, and concurrent passes
//! cannot double-book.
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`flight_store`] -- flight lookups, horizon queries, demand updates
//! - [`seat_store`] -- seat counts and booking flips
//! - [`fare_store`] -- fare-history append and query
//! - [`error`] -- shared error types

pub mod error;
pub mod fare_store;
pub mod flight_store;
pub mod postgres;
pub mod seat_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use fare_store::{FareRow, FareStore};
pub use flight_store::{FlightRow, FlightStore, NewFlight};
pub use postgres::{PostgresConfig, PostgresPool};
pub use seat_store::{SeatRow, SeatStore};
