//! Game generation handlers.
//!
//! A failed model call is not an HTTP error here: the caller gets 200 with a
//! `{error, details}` payload, matching what existing frontends expect.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use questforge_core::extract::Extraction;
use questforge_core::service::game;
use questforge_types::error::ServiceError;
use questforge_types::game::{
    AddCharacterInput, AddSceneInput, CharacterAdded, GenerateGameInput, PhaserGameRequest,
    SceneAdded, SceneRequest,
};
use questforge_types::llm::TransportFailure;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /generate-game
pub async fn generate_game(
    State(state): State<AppState>,
    Json(body): Json<GenerateGameInput>,
) -> Result<Response, AppError> {
    respond(state.game_service.generate_game(&body).await)
}

/// POST /generate-scene
pub async fn generate_scene(
    State(state): State<AppState>,
    Json(body): Json<SceneRequest>,
) -> Result<Response, AppError> {
    respond(state.game_service.generate_scene(&body).await)
}

/// POST /generate-phaser-game
pub async fn generate_phaser_game(
    State(state): State<AppState>,
    Json(body): Json<PhaserGameRequest>,
) -> Response {
    match state.game_service.generate_phaser_game(&body).await {
        Ok(extraction) => Json(extraction.into_value()).into_response(),
        Err(e) => Json(TransportFailure::from(e)).into_response(),
    }
}

/// POST /add-scene
pub async fn add_scene(Json(body): Json<AddSceneInput>) -> Json<SceneAdded> {
    Json(game::add_scene(body))
}

/// POST /add-character
pub async fn add_character(Json(body): Json<AddCharacterInput>) -> Json<CharacterAdded> {
    Json(game::add_character(body))
}

fn respond(result: Result<Extraction, ServiceError>) -> Result<Response, AppError> {
    match result {
        Ok(extraction) => Ok(Json(extraction.into_value()).into_response()),
        Err(ServiceError::Llm(e)) => Ok(Json(TransportFailure::from(e)).into_response()),
        Err(ServiceError::Store(e)) => Err(e.into()),
    }
}
