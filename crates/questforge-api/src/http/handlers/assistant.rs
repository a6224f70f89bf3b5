//! Code assistant handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use questforge_types::game::CodeAssistantRequest;
use questforge_types::llm::TransportFailure;

use crate::state::AppState;

/// POST /code-assistant
///
/// Unparseable model output still answers 200 with a diagnostic message and
/// no file edits. Only a failed model call answers 502.
pub async fn code_assistant(
    State(state): State<AppState>,
    Json(body): Json<CodeAssistantRequest>,
) -> Response {
    match state.game_service.code_assistant(&body).await {
        Ok(outcome) => Json(outcome.into_reply()).into_response(),
        Err(e) => (StatusCode::BAD_GATEWAY, Json(TransportFailure::from(e))).into_response(),
    }
}
