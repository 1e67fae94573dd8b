use std::{sync::Arc, time::Instant};

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    engine::RecommendEngine,
    error::AppError,
    types::{RecommendRequest, RecommendResponse},
};

pub type AppState = Arc<RecommendEngine>;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/recommend", post(recommend_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn recommend_handler(
    State(engine): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let start = Instant::now();

    metrics::counter!("requests_total").increment(1);

    let response = engine.recommend(&request)?;

    let latency = start.elapsed().as_secs_f64() * 1000.0;
    metrics::histogram!("request_duration_ms").record(latency);

    info!(
        "Recommended {} courses in {:.1}ms",
        response.recommended_courses.len(),
        latency
    );
    Ok(Json(response))
}

async fn health_handler() -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}
