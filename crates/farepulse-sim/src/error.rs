//! Error types for the demand simulator.

/// Errors that can occur while running a simulation pass.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A storage operation failed.
    #[error("storage error: {0}")]
    Db(#[from] farepulse_db::DbError),

    /// The requested horizon cannot be represented as a time delta.
    #[error("invalid simulation horizon: {hours} hours")]
    InvalidHorizon {
        /// The horizon that was rejected.
        hours: i64,
    },
}
