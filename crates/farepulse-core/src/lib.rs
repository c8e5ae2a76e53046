//! Pure pricing and demand-step math for the FarePulse engine.
//!
//! This crate holds the two computational hearts of the system, both free
//! of I/O:
//!
//! - [`pricing`] -- the dynamic price function: four multiplicative
//!   factors over a flight snapshot, always returning a value.
//! - [`demand`] -- the per-flight simulation step math: booking rate
//!   tables, the truncated-normal booking draw (RNG injected for
//!   reproducibility), and the demand-escalation rule.
//!
//! [`config`] defines the YAML configuration shared by the server binary
//! and the simulator.
//!
//! Storage access and transaction handling live in `farepulse-db` and
//! `farepulse-sim`; this crate only ever sees value snapshots.

pub mod config;
pub mod demand;
pub mod pricing;

pub use config::{ConfigError, FarePulseConfig};
pub use demand::{BookingPlan, base_booking_rate, escalated_level, plan_bookings};
pub use pricing::{PriceRequest, compute_dynamic_price, compute_dynamic_price_at};
