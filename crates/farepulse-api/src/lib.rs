//! HTTP API server for the FarePulse pricing engine.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Quote endpoints** for dynamic prices, computed from a fresh read
//!   of flight and seat state on every request
//! - **Fare-history queries** so a dashboard can chart price movement
//! - **A simulation trigger** (`POST /api/simulate`) that runs one
//!   demand pass inline and returns its outcome
//! - **Minimal HTML status page** (`GET /`) with endpoint links
//!
//! # Architecture
//!
//! Handlers are thin: storage access goes through the `farepulse-db`
//! stores, pricing math through `farepulse-core`, and simulation through
//! `farepulse-sim`. Nothing is cached — every quote reflects the latest
//! committed seat counts and demand level.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
