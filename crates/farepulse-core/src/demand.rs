//! Per-flight demand step math for the booking simulator.
//!
//! Everything here is pure: the random generator is injected so a fixed
//! seed reproduces the exact booking sequence, and no function touches
//! storage. The simulator crate owns the transaction that applies a
//! [`BookingPlan`] to seat rows.
//!
//! # Step shape
//!
//! 1. Base hourly booking rate from the demand level (1/3/6/10).
//! 2. Rate doubled inside 48 hours of departure, times 1.5 inside 7 days.
//! 3. Bookings drawn from a normal distribution around the adjusted rate
//!    (sd = max(1, rate * 0.3)), truncated to an integer and clamped at
//!    zero — a negative draw never un-books seats within a tick.
//! 4. After seats are flipped, demand escalates to `High` when fewer than
//!    20% of seats remain, unless the flight is already `Extreme`.

use chrono::{DateTime, Utc};
use farepulse_types::DemandLevel;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Seconds in one hour.
const SECS_PER_HOUR: i64 = 3_600;
/// 48 hours in seconds (rate doubles inside this window).
const SECS_48_HOURS: i64 = 48 * SECS_PER_HOUR;
/// 168 hours in seconds (rate times 1.5 inside this window).
const SECS_168_HOURS: i64 = 168 * SECS_PER_HOUR;

/// Relative standard deviation of the booking draw (30% of the rate).
const DRAW_SD_FRACTION: f64 = 0.3;
/// Floor for the booking draw standard deviation.
const DRAW_SD_FLOOR: f64 = 1.0;

/// Remaining-capacity fraction below which demand escalates (20%).
///
/// Expressed as numerator/denominator so the comparison stays in integer
/// arithmetic: `remaining / total < 1/5  <=>  5 * remaining < total`.
const ESCALATION_NUMERATOR: u64 = 5;

/// The planned booking activity for one flight in one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingPlan {
    /// Number of bookings requested this tick (before capping at
    /// availability).
    pub requested: u32,
    /// The adjusted hourly rate the draw was centred on.
    pub rate: f64,
}

/// Base hourly booking rate for a demand level.
pub const fn base_booking_rate(level: DemandLevel) -> u32 {
    match level {
        DemandLevel::Low => 1,
        DemandLevel::Medium => 3,
        DemandLevel::High => 6,
        DemandLevel::Extreme => 10,
    }
}

/// Booking rate adjusted for proximity to departure.
///
/// Within 48 hours the base rate doubles; within 7 days it rises by half.
/// Past departures count as "within 48 hours" — the simulator's flight
/// query keeps them out, but the math stays total.
pub fn adjusted_booking_rate(
    level: DemandLevel,
    departure_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    let base = f64::from(base_booking_rate(level));
    let secs_until = departure_time.signed_duration_since(now).num_seconds();

    if secs_until < SECS_48_HOURS {
        base * 2.0
    } else if secs_until < SECS_168_HOURS {
        base * 1.5
    } else {
        base
    }
}

/// Draw the number of new bookings for one tick.
///
/// Sampled from `Normal(rate, max(1, rate * 0.3))`, truncated toward zero
/// and clamped at zero. The clamp is a design choice, not a bug: demand
/// never reverses within a tick.
pub fn draw_bookings(rate: f64, rng: &mut impl Rng) -> u32 {
    let sd = (rate * DRAW_SD_FRACTION).max(DRAW_SD_FLOOR);

    // Normal::new only fails for a non-finite or negative sd; the floor
    // above rules that out, but degrade to the mean rather than panic.
    let sample = Normal::new(rate, sd).map_or(rate, |dist| dist.sample(rng));

    truncate_to_count(sample)
}

/// Truncate a draw to a whole, non-negative booking count.
fn truncate_to_count(sample: f64) -> u32 {
    if sample <= 0.0 {
        return 0;
    }
    let whole = sample.trunc().min(f64::from(u32::MAX));
    // Truncation is exact: `whole` is a non-negative integer within u32
    // range after the clamp above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        whole as u32
    }
}

/// Plan this tick's bookings for one flight.
///
/// Combines the rate table, the proximity adjustment, and the random draw.
/// The caller caps `requested` at actual availability.
pub fn plan_bookings(
    level: DemandLevel,
    departure_time: DateTime<Utc>,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> BookingPlan {
    let rate = adjusted_booking_rate(level, departure_time, now);
    let requested = draw_bookings(rate, rng);
    BookingPlan { requested, rate }
}

/// Decide whether a flight's demand level escalates after booking.
///
/// Fires when fewer than 20% of seats remain (a zero-seat flight counts as
/// 0% remaining) and the current level is not `Extreme`. The target is
/// always `High` — even from `Low`, and never `Extreme`; `Extreme` stays
/// reachable only by manual assignment. Returns `None` when the level is
/// unchanged.
///
/// Transitions are monotonic upward: no rule ever lowers a level, and
/// `Extreme` is absorbing.
pub fn escalated_level(
    current: DemandLevel,
    total_seats: u32,
    booked_seats: u32,
) -> Option<DemandLevel> {
    if current == DemandLevel::Extreme {
        return None;
    }

    let remaining = u64::from(total_seats.saturating_sub(booked_seats));

    // remaining / total < 0.2  <=>  5 * remaining < total. A flight with
    // no seat rows reads as 0% remaining and also escalates.
    let below_threshold = total_seats == 0
        || remaining.saturating_mul(ESCALATION_NUMERATOR) < u64::from(total_seats);

    if below_threshold && current != DemandLevel::High {
        Some(DemandLevel::High)
    } else {
        None
    }
}
