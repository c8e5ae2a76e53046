//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity touched by the pricing engine has a strongly-typed ID to
//! prevent accidental mixing of identifiers at compile time. All IDs use
//! UUID v7 (time-ordered) for efficient database indexing.
//!
//! Seat booking depends on the time-ordering: "book the N lowest-identifier
//! available seats" is a deterministic, stable order because v7 IDs sort by
//! creation time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a flight.
    FlightId
}

define_id! {
    /// Unique identifier for a single seat on a flight.
    SeatId
}

define_id! {
    /// Unique identifier for a fare-history record.
    FareRecordId
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types_with_distinct_values() {
        let a = FlightId::new();
        let b = FlightId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn v7_ids_created_in_different_millis_are_time_ordered() {
        let earlier = SeatId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = SeatId::new();
        assert!(earlier < later);
    }

    #[test]
    fn display_matches_inner_uuid() {
        let id = FlightId::new();
        assert_eq!(format!("{id}"), format!("{}", id.into_inner()));
    }

    #[test]
    fn serde_roundtrip() {
        let id = FareRecordId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: FareRecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
