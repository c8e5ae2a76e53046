//! Enumeration types for the FarePulse pricing engine.
//!
//! Demand levels and fare tiers both carry lossy string parsers: callers
//! hand the engine free-form strings (query parameters, legacy seed data)
//! and the engine degrades to a safe default instead of erroring. Strict
//! validation, where wanted, belongs to the caller.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Demand level
// ---------------------------------------------------------------------------

/// Coarse demand signal for a flight.
///
/// Ordered: `Low < Medium < High < Extreme`. The ordering matters — the
/// simulator only ever moves a flight's level upward, and `Extreme` is
/// absorbing with respect to automatic escalation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum DemandLevel {
    /// Quiet route, bookings trickle in.
    Low,
    /// Baseline demand. The fallback when a stored level fails to parse.
    Medium,
    /// Elevated demand; also the target of automatic escalation.
    High,
    /// Peak demand. Only reachable by manual assignment or seed data.
    Extreme,
}

impl DemandLevel {
    /// Parse a free-form string into a demand level.
    ///
    /// Matching is case-insensitive. Anything that is not one of the four
    /// known levels falls back to [`DemandLevel::Medium`] — this function
    /// never fails.
    pub fn parse_lossy(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            "extreme" => Self::Extreme,
            _ => Self::Medium,
        }
    }

    /// Return the canonical lowercase string stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }
}

impl core::fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Fare tier
// ---------------------------------------------------------------------------

/// Fare class a price quote is computed for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FareTier {
    /// Base fare, multiplier 1.0. Also the fallback for unknown tiers.
    Economy,
    /// Refundable economy.
    EconomyFlex,
    /// Business cabin.
    Business,
    /// First class.
    First,
}

impl FareTier {
    /// Parse a free-form tier string, case-insensitively.
    ///
    /// Unknown tiers fall back to [`FareTier::Economy`] (multiplier 1.0),
    /// so a quote is always produced.
    pub fn parse_lossy(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "ECONOMY_FLEX" => Self::EconomyFlex,
            "BUSINESS" => Self::Business,
            "FIRST" => Self::First,
            _ => Self::Economy,
        }
    }

    /// Return the canonical snake_case string stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::EconomyFlex => "economy_flex",
            Self::Business => "business",
            Self::First => "first",
        }
    }
}

impl core::fmt::Display for FareTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Flight status
// ---------------------------------------------------------------------------

/// Operational status of a flight.
///
/// The simulator only books seats on flights that are still bookable
/// (scheduled or delayed); the rest exist so the storage layer can
/// represent the full lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum FlightStatus {
    /// Flight is on the books and bookable.
    Scheduled,
    /// Departure pushed back; still bookable.
    Delayed,
    /// Flight will not operate.
    Cancelled,
    /// Flight has left; no further pricing or simulation.
    Departed,
}

impl FlightStatus {
    /// Return the canonical lowercase string stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Delayed => "delayed",
            Self::Cancelled => "cancelled",
            Self::Departed => "departed",
        }
    }

    /// Parse a stored status string, falling back to `Scheduled`.
    pub fn parse_lossy(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "delayed" => Self::Delayed,
            "cancelled" => Self::Cancelled,
            "departed" => Self::Departed,
            _ => Self::Scheduled,
        }
    }
}

impl core::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn demand_levels_are_ordered() {
        assert!(DemandLevel::Low < DemandLevel::Medium);
        assert!(DemandLevel::Medium < DemandLevel::High);
        assert!(DemandLevel::High < DemandLevel::Extreme);
    }

    #[test]
    fn demand_parse_is_case_insensitive() {
        assert_eq!(DemandLevel::parse_lossy("EXTREME"), DemandLevel::Extreme);
        assert_eq!(DemandLevel::parse_lossy("Low"), DemandLevel::Low);
        assert_eq!(DemandLevel::parse_lossy("high"), DemandLevel::High);
    }

    #[test]
    fn unknown_demand_falls_back_to_medium() {
        assert_eq!(DemandLevel::parse_lossy("frenzied"), DemandLevel::Medium);
        assert_eq!(DemandLevel::parse_lossy(""), DemandLevel::Medium);
    }

    #[test]
    fn tier_parse_accepts_any_case() {
        assert_eq!(FareTier::parse_lossy("business"), FareTier::Business);
        assert_eq!(FareTier::parse_lossy("Economy_Flex"), FareTier::EconomyFlex);
        assert_eq!(FareTier::parse_lossy("FIRST"), FareTier::First);
    }

    #[test]
    fn unknown_tier_falls_back_to_economy() {
        assert_eq!(FareTier::parse_lossy("premium_select"), FareTier::Economy);
    }

    #[test]
    fn canonical_strings_roundtrip_through_parse() {
        for level in [
            DemandLevel::Low,
            DemandLevel::Medium,
            DemandLevel::High,
            DemandLevel::Extreme,
        ] {
            assert_eq!(DemandLevel::parse_lossy(level.as_str()), level);
        }
        for tier in [
            FareTier::Economy,
            FareTier::EconomyFlex,
            FareTier::Business,
            FareTier::First,
        ] {
            assert_eq!(FareTier::parse_lossy(tier.as_str()), tier);
        }
    }

    #[test]
    fn demand_level_serializes_lowercase() {
        let json = serde_json::to_string(&DemandLevel::Extreme).unwrap();
        assert_eq!(json, "\"extreme\"");
    }

    #[test]
    fn fare_tier_serializes_snake_case() {
        let json = serde_json::to_string(&FareTier::EconomyFlex).unwrap();
        assert_eq!(json, "\"economy_flex\"");
    }
}
