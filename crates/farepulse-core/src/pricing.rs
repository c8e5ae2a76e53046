//! Dynamic price computation for a single flight and fare tier.
//!
//! The price is the base fare scaled by four independent multiplicative
//! factors: inventory scarcity, time to departure, demand level, and fare
//! tier. The function is pure and total — every input degrades to a safe
//! default instead of erroring, so a quote is always produced.
//!
//! # Design Principles
//!
//! - All monetary values use [`rust_decimal::Decimal`] -- no floating-point
//!   money.
//! - Bucket boundaries are evaluated in integer arithmetic (cross
//!   multiplication for percentages, whole seconds for hours) so there is
//!   no float comparison anywhere on the pricing path.
//! - The inventory direction is intentional: a mostly-empty plane is
//!   discounted (0.90), a nearly-full plane carries a premium (1.25).

use chrono::{DateTime, Utc};
use farepulse_types::{DemandLevel, FareTier, FlightSnapshot};
use rust_decimal::Decimal;

/// Multiplier when more than 70% of seats remain.
const INVENTORY_DISCOUNT: Decimal = Decimal::from_parts(90, 0, 0, false, 2);
/// Multiplier when 40--70% of seats remain (neutral).
const INVENTORY_NEUTRAL: Decimal = Decimal::ONE;
/// Multiplier when 20--40% of seats remain.
const INVENTORY_TIGHT: Decimal = Decimal::from_parts(110, 0, 0, false, 2);
/// Multiplier when 20% or fewer seats remain.
const INVENTORY_SCARCE: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// Multiplier for departures more than 30 days out.
const TIME_FAR: Decimal = Decimal::ONE;
/// Multiplier for departures 7--30 days out.
const TIME_MONTH: Decimal = Decimal::from_parts(105, 0, 0, false, 2);
/// Multiplier for departures 2--7 days out.
const TIME_WEEK: Decimal = Decimal::from_parts(115, 0, 0, false, 2);
/// Multiplier for departures within 48 hours.
const TIME_IMMINENT: Decimal = Decimal::from_parts(130, 0, 0, false, 2);

/// Seconds in one hour.
const SECS_PER_HOUR: i64 = 3_600;
/// 720 hours (30 days) in seconds.
const SECS_720_HOURS: i64 = 720 * SECS_PER_HOUR;
/// 168 hours (7 days) in seconds.
const SECS_168_HOURS: i64 = 168 * SECS_PER_HOUR;
/// 48 hours in seconds.
const SECS_48_HOURS: i64 = 48 * SECS_PER_HOUR;

/// Inputs to a dynamic price computation.
///
/// A value snapshot — the caller reads it fresh from storage for every
/// quote; the pricing function performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRequest {
    /// Base fare before multipliers. Expected positive; the function does
    /// not reject other values, it just scales them.
    pub base_fare: Decimal,
    /// Scheduled departure (UTC).
    pub departure_time: DateTime<Utc>,
    /// Total seats on the flight. Zero means "no scarcity signal" and the
    /// inventory multiplier stays neutral.
    pub total_seats: u32,
    /// Seats already booked.
    pub booked_seats: u32,
    /// Current demand level.
    pub demand_level: DemandLevel,
    /// Fare tier the quote is for.
    pub tier: FareTier,
}

impl PriceRequest {
    /// Build a request from a flight snapshot for one tier.
    ///
    /// The usual entry point for callers that read state through the
    /// storage layer: one snapshot prices any number of tiers.
    pub const fn for_tier(snapshot: &FlightSnapshot, tier: FareTier) -> Self {
        Self {
            base_fare: snapshot.base_fare,
            departure_time: snapshot.departure_time,
            total_seats: snapshot.total_seats,
            booked_seats: snapshot.booked_seats,
            demand_level: snapshot.demand_level,
            tier,
        }
    }
}

/// Compute the dynamic price for a request at the current time.
///
/// Convenience wrapper around [`compute_dynamic_price_at`] with
/// `now = Utc::now()`.
pub fn compute_dynamic_price(request: &PriceRequest) -> Decimal {
    compute_dynamic_price_at(request, Utc::now())
}

/// Compute the dynamic price for a request at an explicit reference time.
///
/// `price = base_fare * inventory * time * demand * tier`, rounded to two
/// decimal places (banker's rounding). Pure and infallible: degraded
/// inputs fall back to
/// neutral multipliers, and an (unreachable in practice) `Decimal` overflow
/// saturates to `Decimal::MAX`.
pub fn compute_dynamic_price_at(request: &PriceRequest, now: DateTime<Utc>) -> Decimal {
    let remaining = request.total_seats.saturating_sub(request.booked_seats);

    let inv_mult = inventory_multiplier(remaining, request.total_seats);
    let t_mult = time_multiplier(request.departure_time, now);
    let d_mult = demand_multiplier(request.demand_level);
    let tr_mult = tier_multiplier(request.tier);

    request
        .base_fare
        .checked_mul(inv_mult)
        .and_then(|p| p.checked_mul(t_mult))
        .and_then(|p| p.checked_mul(d_mult))
        .and_then(|p| p.checked_mul(tr_mult))
        .unwrap_or(Decimal::MAX)
        .round_dp(2)
}

/// Price adjustment factor derived from remaining-seat percentage.
///
/// | Remaining | Multiplier |
/// |-----------|------------|
/// | > 70%     | 0.90       |
/// | > 40%     | 1.00       |
/// | > 20%     | 1.10       |
/// | otherwise | 1.25       |
///
/// `total_seats == 0` is treated as "no scarcity data" and returns the
/// neutral 1.0.
pub fn inventory_multiplier(remaining_seats: u32, total_seats: u32) -> Decimal {
    if total_seats == 0 {
        return INVENTORY_NEUTRAL;
    }

    // remaining / total > x/10  <=>  10 * remaining > x * total,
    // evaluated in u64 so the cross multiplication cannot overflow.
    let remaining = u64::from(remaining_seats);
    let total = u64::from(total_seats);

    if remaining.saturating_mul(10) > total.saturating_mul(7) {
        INVENTORY_DISCOUNT
    } else if remaining.saturating_mul(10) > total.saturating_mul(4) {
        INVENTORY_NEUTRAL
    } else if remaining.saturating_mul(10) > total.saturating_mul(2) {
        INVENTORY_TIGHT
    } else {
        INVENTORY_SCARCE
    }
}

/// Price adjustment factor derived from hours until departure.
///
/// | Hours out | Multiplier |
/// |-----------|------------|
/// | > 720     | 1.00       |
/// | > 168     | 1.05       |
/// | > 48      | 1.15       |
/// | otherwise | 1.30       |
///
/// Departures in the past land in the "otherwise" bucket; the pricing
/// function does not police flight lifecycle.
pub fn time_multiplier(departure_time: DateTime<Utc>, now: DateTime<Utc>) -> Decimal {
    let secs_until = departure_time.signed_duration_since(now).num_seconds();

    if secs_until > SECS_720_HOURS {
        TIME_FAR
    } else if secs_until > SECS_168_HOURS {
        TIME_MONTH
    } else if secs_until > SECS_48_HOURS {
        TIME_WEEK
    } else {
        TIME_IMMINENT
    }
}

/// Price adjustment factor for the flight's demand level.
pub const fn demand_multiplier(level: DemandLevel) -> Decimal {
    match level {
        DemandLevel::Low => Decimal::from_parts(95, 0, 0, false, 2),
        DemandLevel::Medium => Decimal::ONE,
        DemandLevel::High => Decimal::from_parts(110, 0, 0, false, 2),
        DemandLevel::Extreme => Decimal::from_parts(125, 0, 0, false, 2),
    }
}

/// Price adjustment factor for the fare tier.
pub const fn tier_multiplier(tier: FareTier) -> Decimal {
    match tier {
        FareTier::Economy => Decimal::ONE,
        FareTier::EconomyFlex => Decimal::from_parts(120, 0, 0, false, 2),
        FareTier::Business => Decimal::from_parts(180, 0, 0, false, 2),
        FareTier::First => Decimal::from_parts(250, 0, 0, false, 2),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn request(total: u32, booked: u32, level: DemandLevel, tier: FareTier) -> PriceRequest {
        PriceRequest {
            base_fare: dec("1000"),
            departure_time: Utc::now(),
            total_seats: total,
            booked_seats: booked,
            demand_level: level,
            tier,
        }
    }

    // -- inventory multiplier boundaries ------------------------------------

    #[test]
    fn inventory_71_pct_remaining_discounts() {
        assert_eq!(inventory_multiplier(71, 100), dec("0.90"));
    }

    #[test]
    fn inventory_70_pct_is_not_discounted() {
        // Strict "> 0.7": exactly 70% falls into the neutral bucket.
        assert_eq!(inventory_multiplier(70, 100), dec("1.00"));
    }

    #[test]
    fn inventory_45_pct_is_neutral() {
        assert_eq!(inventory_multiplier(45, 100), dec("1.00"));
    }

    #[test]
    fn inventory_25_pct_is_tight() {
        assert_eq!(inventory_multiplier(25, 100), dec("1.10"));
    }

    #[test]
    fn inventory_20_pct_boundary_is_tight_bucket_exclusive() {
        // Strict "> 0.2": exactly 20% lands in the scarce bucket.
        assert_eq!(inventory_multiplier(20, 100), dec("1.25"));
    }

    #[test]
    fn inventory_15_pct_is_scarce() {
        assert_eq!(inventory_multiplier(15, 100), dec("1.25"));
    }

    #[test]
    fn inventory_zero_total_is_neutral() {
        assert_eq!(inventory_multiplier(0, 0), dec("1.00"));
    }

    #[test]
    fn inventory_direction_premium_when_scarce() {
        // Counter-intuitive by design: more remaining seats, lower price.
        assert!(inventory_multiplier(90, 100) < inventory_multiplier(5, 100));
    }

    // -- time multiplier boundaries -----------------------------------------

    #[test]
    fn time_100_days_out_is_far() {
        let now = Utc::now();
        let dep = now + TimeDelta::days(100);
        assert_eq!(time_multiplier(dep, now), dec("1.00"));
    }

    #[test]
    fn time_10_days_out_is_month_bucket() {
        let now = Utc::now();
        let dep = now + TimeDelta::days(10);
        assert_eq!(time_multiplier(dep, now), dec("1.05"));
    }

    #[test]
    fn time_3_days_out_is_week_bucket() {
        let now = Utc::now();
        let dep = now + TimeDelta::days(3);
        assert_eq!(time_multiplier(dep, now), dec("1.15"));
    }

    #[test]
    fn time_10_hours_out_is_imminent() {
        let now = Utc::now();
        let dep = now + TimeDelta::hours(10);
        assert_eq!(time_multiplier(dep, now), dec("1.30"));
    }

    #[test]
    fn time_exactly_720_hours_is_month_bucket() {
        // Strict "> 720": exactly 30 days falls through to 1.05.
        let now = Utc::now();
        let dep = now + TimeDelta::hours(720);
        assert_eq!(time_multiplier(dep, now), dec("1.05"));
    }

    #[test]
    fn time_departed_flight_prices_as_imminent() {
        let now = Utc::now();
        let dep = now - TimeDelta::hours(2);
        assert_eq!(time_multiplier(dep, now), dec("1.30"));
    }

    // -- demand and tier tables ---------------------------------------------

    #[test]
    fn demand_multiplier_table() {
        assert_eq!(demand_multiplier(DemandLevel::Low), dec("0.95"));
        assert_eq!(demand_multiplier(DemandLevel::Medium), dec("1.00"));
        assert_eq!(demand_multiplier(DemandLevel::High), dec("1.10"));
        assert_eq!(demand_multiplier(DemandLevel::Extreme), dec("1.25"));
    }

    #[test]
    fn tier_multiplier_table() {
        assert_eq!(tier_multiplier(FareTier::Economy), dec("1.00"));
        assert_eq!(tier_multiplier(FareTier::EconomyFlex), dec("1.20"));
        assert_eq!(tier_multiplier(FareTier::Business), dec("1.80"));
        assert_eq!(tier_multiplier(FareTier::First), dec("2.50"));
    }

    // -- full price computation ---------------------------------------------

    #[test]
    fn regression_anchor_ten_days_out() {
        // base 1000, 90/100 remaining (0.90), 10 days out (1.05),
        // medium (1.00), economy (1.00) => 945.00
        let now = Utc::now();
        let mut req = request(100, 10, DemandLevel::Medium, FareTier::Economy);
        req.departure_time = now + TimeDelta::days(10);
        assert_eq!(compute_dynamic_price_at(&req, now), dec("945.00"));
    }

    #[test]
    fn near_full_flight_costs_at_least_as_much_as_empty() {
        let now = Utc::now();
        let mut roomy = request(100, 10, DemandLevel::Medium, FareTier::Economy);
        roomy.departure_time = now + TimeDelta::days(5);
        let mut packed = roomy.clone();
        packed.booked_seats = 95;

        let price_roomy = compute_dynamic_price_at(&roomy, now);
        let price_packed = compute_dynamic_price_at(&packed, now);
        assert!(price_packed >= price_roomy);
        // 0.90 vs 1.25 inventory buckets on otherwise equal inputs.
        assert_eq!(price_roomy, dec("945.00"));
        assert_eq!(price_packed, dec("1312.50"));
    }

    #[test]
    fn extreme_demand_prices_above_low_demand() {
        let now = Utc::now();
        let mut low = request(100, 50, DemandLevel::Low, FareTier::Economy);
        low.departure_time = now + TimeDelta::days(10);
        let mut extreme = low.clone();
        extreme.demand_level = DemandLevel::Extreme;

        let price_low = compute_dynamic_price_at(&low, now);
        let price_extreme = compute_dynamic_price_at(&extreme, now);
        assert!(price_extreme >= price_low);

        // Ratio is exactly 1.25 / 0.95.
        let ratio = price_extreme.checked_div(price_low).unwrap();
        let expected = dec("1.25").checked_div(dec("0.95")).unwrap();
        assert_eq!(ratio.round_dp(6), expected.round_dp(6));
    }

    #[test]
    fn first_class_imminent_scarce_extreme_is_the_ceiling() {
        // 1000 * 1.25 * 1.30 * 1.25 * 2.50 = 5078.125 -> 5078.12 (banker's)
        let now = Utc::now();
        let mut req = request(100, 95, DemandLevel::Extreme, FareTier::First);
        req.departure_time = now + TimeDelta::hours(10);
        assert_eq!(compute_dynamic_price_at(&req, now), dec("5078.12"));
    }

    #[test]
    fn zero_inventory_prices_with_neutral_scarcity() {
        let now = Utc::now();
        let mut req = request(0, 0, DemandLevel::Medium, FareTier::Economy);
        req.departure_time = now + TimeDelta::days(10);
        // 1000 * 1.00 * 1.05 = 1050.00, no division error.
        assert_eq!(compute_dynamic_price_at(&req, now), dec("1050.00"));
    }

    #[test]
    fn price_rounds_to_two_decimal_places() {
        let now = Utc::now();
        let mut req = request(100, 50, DemandLevel::Low, FareTier::EconomyFlex);
        req.base_fare = dec("333.33");
        req.departure_time = now + TimeDelta::days(3);
        // 333.33 * 1.00 * 1.15 * 0.95 * 1.20 = 436.995... -> 437.00
        let price = compute_dynamic_price_at(&req, now);
        assert_eq!(price.scale(), 2);
        assert_eq!(price, dec("437.00"));
    }

    #[test]
    fn snapshot_prices_like_explicit_fields() {
        use farepulse_types::{FlightId, FlightStatus};

        let now = Utc::now();
        let snapshot = FlightSnapshot {
            id: FlightId::new(),
            flight_number: String::from("FP204"),
            departure_time: now + TimeDelta::days(3),
            base_fare: dec("500"),
            demand_level: DemandLevel::High,
            status: FlightStatus::Scheduled,
            total_seats: 100,
            booked_seats: 85,
        };

        let req = PriceRequest::for_tier(&snapshot, FareTier::Business);
        assert_eq!(req.booked_seats, 85);
        // 500 * 1.25 * 1.15 * 1.10 * 1.80 = 1423.125 -> 1423.12 (banker's)
        assert_eq!(compute_dynamic_price_at(&req, now), dec("1423.12"));
    }

    #[test]
    fn lossy_string_inputs_degrade_to_defaults() {
        // Unknown demand string parses to Medium, unknown tier to Economy:
        // the quote matches an explicitly-medium economy request.
        let now = Utc::now();
        let mut explicit = request(100, 10, DemandLevel::Medium, FareTier::Economy);
        explicit.departure_time = now + TimeDelta::days(10);

        let mut degraded = explicit.clone();
        degraded.demand_level = DemandLevel::parse_lossy("surging");
        degraded.tier = FareTier::parse_lossy("super_saver");

        assert_eq!(
            compute_dynamic_price_at(&degraded, now),
            compute_dynamic_price_at(&explicit, now)
        );
    }
}
