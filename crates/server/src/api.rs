//! HTTP API.
//!
//! `POST /recommend` takes `{"userMovieIds": [...]}` and answers
//! `{"recommendedMovieIds": [...]}`. A missing or null `userMovieIds` is
//! treated as an empty history; a body that is not a JSON object is rejected.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use catalog::MovieId;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::error::{AppError, AppResult};
use crate::recommender::Recommender;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Self {
        Self { recommender }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default)]
    pub user_movie_ids: Option<Vec<MovieId>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub recommended_movie_ids: Vec<MovieId>,
}

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/recommend", post(recommend))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Decode a request body, which must be a JSON object
fn parse_request(body: Value) -> AppResult<RecommendRequest> {
    if !body.is_object() {
        return Err(AppError::InvalidInput(
            "Request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(body)
        .map_err(|e| AppError::InvalidInput(format!("Invalid request body: {}", e)))
}

/// Handler for the recommendation endpoint
///
/// The ranking is CPU-bound, so it runs on the blocking pool.
async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<RecommendResponse>> {
    let Json(body) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    let request = parse_request(body)?;
    let seen = request.user_movie_ids.unwrap_or_default();

    let recommender = state.recommender.clone();
    let recommended_movie_ids = tokio::task::spawn_blocking(move || recommender.recommend(&seen))
        .await
        .map_err(|e| AppError::Internal(format!("Recommendation task failed: {}", e)))??;

    Ok(Json(RecommendResponse {
        recommended_movie_ids,
    }))
}
