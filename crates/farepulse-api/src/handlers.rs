//! REST API endpoint handlers for the FarePulse server.
//!
//! Every price-bearing handler reads flight and seat state fresh from
//! storage — quotes are computed on demand, never cached, so two requests
//! straddling a simulation pass see the price move.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/flights` | List flights departing within a horizon |
//! | `GET` | `/api/flights/{id}` | Single flight with seat counts |
//! | `GET` | `/api/flights/{id}/price` | Dynamic price quote for a tier |
//! | `GET` | `/api/flights/{id}/fares` | Fare history, newest first |
//! | `POST` | `/api/simulate` | Run one demand-simulation pass |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use chrono::{DateTime, TimeDelta, Utc};
use farepulse_core::pricing::{self, PriceRequest};
use farepulse_db::FareRow;
use farepulse_types::{
    DemandLevel, FareRecord, FareTier, FlightId, PriceQuote, SimulationOutcome,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Default number of flights returned by the listing endpoint.
const DEFAULT_FLIGHT_LIMIT: i64 = 100;
/// Default number of fare-history rows returned per request.
const DEFAULT_FARE_LIMIT: i64 = 50;
/// Hard cap on rows returned by any listing endpoint.
const MAX_LIMIT: i64 = 1_000;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /api/flights` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct FlightsQuery {
    /// Horizon in hours; only flights departing within it are listed.
    /// Defaults to the configured simulation horizon.
    pub within_hours: Option<i64>,
    /// Maximum number of flights to return (default 100, max 1000).
    pub limit: Option<i64>,
}

/// Query parameters for the `GET /api/flights/{id}/price` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct PriceQuery {
    /// Fare tier to quote. Unknown values degrade to economy.
    pub tier: Option<String>,
}

/// Query parameters for the `GET /api/flights/{id}/fares` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct FaresQuery {
    /// Maximum number of records to return (default 50, max 1000).
    pub limit: Option<i64>,
}

/// Query parameters for the `POST /api/simulate` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct SimulateQuery {
    /// Horizon in hours; flights departing within it are simulated.
    /// Defaults to the configured simulation horizon.
    pub within_hours: Option<i64>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = Utc::now();
    let upcoming = match horizon_cutoff(now, state.default_within_hours) {
        Ok(cutoff) => match state.flights().departing_within(now, cutoff, MAX_LIMIT).await {
            Ok(rows) => rows.len(),
            Err(error) => {
                tracing::warn!(%error, "Status page flight count query failed");
                0
            }
        },
        Err(_) => 0,
    };
    let horizon = state.default_within_hours;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>FarePulse</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        li.post::before {{ content: "POST "; color: #d29922; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>FarePulse</h1>
    <p class="subtitle">Dynamic pricing and demand simulation</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Upcoming flights</div>
            <div class="value">{upcoming}</div>
        </div>
        <div class="metric">
            <div class="label">Horizon (hours)</div>
            <div class="value">{horizon}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/flights">/api/flights</a> -- List upcoming flights (?within_hours=N&amp;limit=N)</li>
        <li>/api/flights/{{id}} -- Single flight with seat counts</li>
        <li>/api/flights/{{id}}/price -- Dynamic price quote (?tier=business)</li>
        <li>/api/flights/{{id}}/fares -- Fare history, newest first (?limit=N)</li>
        <li class="post">/api/simulate -- Run one demand-simulation pass (?within_hours=N)</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/flights -- list flights departing within a horizon
// ---------------------------------------------------------------------------

/// List flights departing within the requested horizon, soonest first,
/// each with its current seat counts and demand level.
pub async fn list_flights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FlightsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now();
    let within = params.within_hours.unwrap_or(state.default_within_hours);
    let cutoff = horizon_cutoff(now, within)?;
    let limit = params.limit.unwrap_or(DEFAULT_FLIGHT_LIMIT).clamp(1, MAX_LIMIT);

    let rows = state.flights().departing_within(now, cutoff, limit).await?;

    let mut flights = Vec::with_capacity(rows.len());
    for row in &rows {
        let counts = state.seats().counts(row.flight_id()).await?;
        flights.push(serde_json::json!({
            "id": row.id,
            "flight_number": row.flight_number,
            "departure_time": row.departure_time,
            "arrival_time": row.arrival_time,
            "base_fare": row.base_fare,
            "demand_level": row.demand_level(),
            "status": row.status(),
            "total_seats": counts.total,
            "remaining_seats": counts.available,
        }));
    }

    Ok(Json(serde_json::json!({
        "count": flights.len(),
        "flights": flights,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/flights/{id} -- single flight detail
// ---------------------------------------------------------------------------

/// Return a single flight with its seat counts.
pub async fn get_flight(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let flight_id = parse_flight_id(&id_str)?;

    let flight = state
        .flights()
        .get(flight_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("flight {flight_id}")))?;
    let counts = state.seats().counts(flight_id).await?;

    Ok(Json(serde_json::json!({
        "id": flight.id,
        "flight_number": flight.flight_number,
        "departure_time": flight.departure_time,
        "arrival_time": flight.arrival_time,
        "base_fare": flight.base_fare,
        "demand_level": flight.demand_level(),
        "status": flight.status(),
        "seats": {
            "total": counts.total,
            "available": counts.available,
            "booked": counts.booked(),
        },
    })))
}

// ---------------------------------------------------------------------------
// GET /api/flights/{id}/price -- dynamic price quote
// ---------------------------------------------------------------------------

/// Compute a dynamic price quote for one flight and tier.
///
/// The quote is computed from a fresh read of the flight and its seat
/// counts, then appended to the fare history before being returned.
/// Unknown tier strings degrade to economy rather than erroring.
pub async fn quote_price(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Query(params): Query<PriceQuery>,
) -> Result<Json<PriceQuote>, ApiError> {
    let flight_id = parse_flight_id(&id_str)?;
    let tier = params
        .tier
        .as_deref()
        .map_or(FareTier::Economy, FareTier::parse_lossy);

    let flight = state
        .flights()
        .get(flight_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("flight {flight_id}")))?;
    let counts = state.seats().counts(flight_id).await?;
    let snapshot = flight.snapshot(counts);

    let now = Utc::now();
    let request = PriceRequest::for_tier(&snapshot, tier);
    let price = pricing::compute_dynamic_price_at(&request, now);

    let quote = PriceQuote {
        flight_id,
        tier,
        price,
        remaining_seats: snapshot.remaining_seats(),
        demand_level: snapshot.demand_level,
        computed_at: now,
    };
    state.fares().record(&quote).await?;

    tracing::debug!(
        flight_id = %flight_id,
        tier = %tier,
        price = %price,
        "Served price quote"
    );
    Ok(Json(quote))
}

// ---------------------------------------------------------------------------
// GET /api/flights/{id}/fares -- fare history
// ---------------------------------------------------------------------------

/// Return the fare history for a flight, newest first.
pub async fn fare_history(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Query(params): Query<FaresQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let flight_id = parse_flight_id(&id_str)?;
    let limit = params.limit.unwrap_or(DEFAULT_FARE_LIMIT).clamp(1, MAX_LIMIT);

    let rows = state.fares().history(flight_id, limit).await?;
    let fares: Vec<FareRecord> = rows.iter().map(fare_record_from_row).collect();

    Ok(Json(serde_json::json!({
        "count": fares.len(),
        "fares": fares,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/simulate -- run one demand-simulation pass
// ---------------------------------------------------------------------------

/// Run one demand-simulation pass over flights departing within the
/// requested horizon and return the pass outcome.
pub async fn run_simulation(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SimulateQuery>,
) -> Result<Json<SimulationOutcome>, ApiError> {
    let within = params.within_hours.unwrap_or(state.default_within_hours);
    if within <= 0 {
        return Err(ApiError::InvalidQuery(format!(
            "within_hours must be positive, got {within}"
        )));
    }

    let outcome = state.simulator.run_once(within).await?;
    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a flight ID from a path segment, returning 400 on failure.
fn parse_flight_id(value: &str) -> Result<FlightId, ApiError> {
    value
        .parse::<Uuid>()
        .map(FlightId::from)
        .map_err(|e| ApiError::InvalidUuid(format!("{value}: {e}")))
}

/// Resolve `now + hours` as the listing/simulation cutoff.
fn horizon_cutoff(now: DateTime<Utc>, hours: i64) -> Result<DateTime<Utc>, ApiError> {
    if hours <= 0 {
        return Err(ApiError::InvalidQuery(format!(
            "within_hours must be positive, got {hours}"
        )));
    }
    TimeDelta::try_hours(hours)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| ApiError::InvalidQuery(format!("within_hours out of range: {hours}")))
}

/// Convert a stored fare row into the typed record served by the API.
///
/// Stored enum strings parse lossily, so rows written by older versions
/// still serve.
fn fare_record_from_row(row: &FareRow) -> FareRecord {
    FareRecord {
        id: row.id.into(),
        flight_id: row.flight_id.into(),
        recorded_at: row.recorded_at,
        tier: FareTier::parse_lossy(&row.tier),
        price: row.price,
        remaining_seats: u32::try_from(row.remaining_seats).unwrap_or(0),
        demand_level: DemandLevel::parse_lossy(&row.demand_level),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn flight_id_parses_from_uuid_string() {
        let id = FlightId::new();
        let parsed = parse_flight_id(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn malformed_flight_id_is_rejected() {
        assert!(matches!(
            parse_flight_id("not-a-uuid"),
            Err(ApiError::InvalidUuid(_))
        ));
    }

    #[test]
    fn horizon_cutoff_advances_by_hours() {
        let now = Utc::now();
        let cutoff = horizon_cutoff(now, 48).unwrap();
        assert_eq!(
            cutoff,
            now.checked_add_signed(TimeDelta::hours(48)).unwrap()
        );
    }

    #[test]
    fn nonpositive_horizon_is_rejected() {
        let now = Utc::now();
        assert!(matches!(
            horizon_cutoff(now, 0),
            Err(ApiError::InvalidQuery(_))
        ));
        assert!(matches!(
            horizon_cutoff(now, -24),
            Err(ApiError::InvalidQuery(_))
        ));
    }

    #[test]
    fn fare_row_converts_with_lossy_enum_parsing() {
        let row = FareRow {
            id: Uuid::now_v7(),
            flight_id: Uuid::now_v7(),
            recorded_at: Utc::now(),
            tier: String::from("BUSINESS"),
            price: Decimal::new(94_500, 2),
            remaining_seats: 12,
            demand_level: String::from("surging"),
        };
        let record = fare_record_from_row(&row);
        assert_eq!(record.tier, FareTier::Business);
        assert_eq!(record.demand_level, DemandLevel::Medium);
        assert_eq!(record.remaining_seats, 12);
    }

    #[test]
    fn negative_remaining_seats_clamps_to_zero() {
        let row = FareRow {
            id: Uuid::now_v7(),
            flight_id: Uuid::now_v7(),
            recorded_at: Utc::now(),
            tier: String::from("economy"),
            price: Decimal::new(45_000, 2),
            remaining_seats: -3,
            demand_level: String::from("low"),
        };
        assert_eq!(fare_record_from_row(&row).remaining_seats, 0);
    }
}
