use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::Serialize;
use stopover_core::TripRequest;
use stopover_evaluator::{Constraints, RankedEntry, Ranker};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub status: &'static str,
    pub data: TripPlan,
}

#[derive(Debug, Serialize)]
pub struct TripPlan {
    pub request_id: Uuid,
    pub recommended: Vec<RankedEntry>,
    /// Offers dropped before ranking (no usable price, over budget)
    pub skipped: usize,
    pub meta: TripMeta,
}

#[derive(Debug, Serialize)]
pub struct TripMeta {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub interests: Vec<String>,
    pub max_price: Option<f64>,
    pub preferred_airlines: Vec<String>,
    pub offers_considered: usize,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/plan-trip", post(plan_trip))
}

/// POST /plan-trip
/// Search offers for the leg, then shortlist them by price and stopover interest.
pub async fn plan_trip(
    State(state): State<AppState>,
    Json(payload): Json<TripRequest>,
) -> Result<Json<TripResponse>, AppError> {
    let trip = payload.validate().map_err(AppError::from_core)?;

    info!(
        "Received plan-trip request: {} -> {} on {} (interests={:?})",
        trip.origin, trip.destination, trip.date, trip.interests
    );

    // 1. Fetch candidate offers
    let raw = state
        .source
        .search(&trip.origin, &trip.destination, trip.date)
        .await
        .map_err(AppError::from_core)?;

    // 2. Rank off the request loop
    let ranker = Ranker::new(&state.ranking);
    let interests = trip.interests.clone();
    let constraints = Constraints { max_price: trip.max_price };
    let evaluation = tokio::task::spawn_blocking(move || ranker.evaluate(raw, interests.as_slice(), constraints))
        .await
        .map_err(|e| AppError::PlanningError(e.to_string()))?;

    info!(
        "Shortlisted {} of {} offers for {} -> {}",
        evaluation.ranked.len(),
        evaluation.ingested,
        trip.origin,
        trip.destination
    );

    Ok(Json(TripResponse {
        status: "success",
        data: TripPlan {
            request_id: Uuid::new_v4(),
            skipped: evaluation.skipped.len(),
            recommended: evaluation.ranked,
            meta: TripMeta {
                origin: trip.origin,
                destination: trip.destination,
                date: trip.date,
                interests: trip.interests,
                max_price: trip.max_price,
                preferred_airlines: trip.preferred_airlines,
                offers_considered: evaluation.ingested,
            },
        },
    }))
}
