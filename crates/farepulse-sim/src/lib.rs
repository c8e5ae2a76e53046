//! Demand simulation passes over the FarePulse flight roster.
//!
//! Bridges the pure step math in `farepulse-core` and the storage layer in
//! `farepulse-db`: each pass walks the flights departing within a horizon,
//! books a pseudo-random number of seats per flight, and escalates demand
//! levels, one transaction per flight.
//!
//! # Modules
//!
//! - [`simulator`] -- the [`DemandSimulator`] pass runner
//! - [`error`] -- error types

pub mod error;
pub mod simulator;

pub use error::SimError;
pub use simulator::DemandSimulator;
