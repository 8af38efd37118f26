use axum::{http::Method, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod evaluate;
pub mod plan;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The browser UI is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/healthz", get(healthz))
        .merge(plan::routes())
        .merge(evaluate::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /healthz
async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
