//! Read-only access to stored games.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/games - Titles of all stored games.
pub async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let start = Instant::now();

    let games = state.game_service.list_games().await?;
    let titles: Vec<String> = games.into_keys().collect();

    let resp = ApiResponse::timed(titles, start).with_link("self", "/api/v1/games");
    Ok(Json(resp))
}

/// GET /api/v1/games/{title} - One stored game record.
pub async fn get_game(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let start = Instant::now();

    let record = state
        .game_service
        .get_game(&title)
        .await?
        .ok_or_else(|| AppError::NotFound(title.clone()))?;

    let resp = ApiResponse::timed(record.into_value(), start)
        .with_link("self", &format!("/api/v1/games/{title}"))
        .with_link("collection", "/api/v1/games");
    Ok(Json(resp))
}
