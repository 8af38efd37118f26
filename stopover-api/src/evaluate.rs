use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use stopover_evaluator::{Constraints, Evaluation, RawInput, Ranker};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Offer list, provider envelope or text dump
    pub offers: RawInput,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Overrides the configured shortlist size
    #[serde(default)]
    pub k: Option<usize>,
    #[serde(default)]
    pub max_price: Option<f64>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/evaluate", post(evaluate_offers))
}

/// POST /v1/evaluate
/// Rank an already-retrieved offer payload and report what was skipped.
pub async fn evaluate_offers(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<Evaluation>, AppError> {
    if let Some(max_price) = req.max_price {
        if !max_price.is_finite() || max_price < 0.0 {
            return Err(AppError::ValidationError(format!(
                "max_price must be a non-negative amount, got {}",
                max_price
            )));
        }
    }

    let mut ranker = Ranker::new(&state.ranking);
    if let Some(k) = req.k {
        ranker = ranker.with_top_k(k);
    }
    let constraints = Constraints { max_price: req.max_price };
    let interests = req.interests;
    let offers = req.offers;

    let evaluation = tokio::task::spawn_blocking(move || ranker.evaluate(offers, interests.as_slice(), constraints))
        .await
        .map_err(anyhow::Error::from)?;

    Ok(Json(evaluation))
}
