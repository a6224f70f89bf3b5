//! Axum router configuration with middleware.
//!
//! Generation endpoints live at the root so existing frontends keep working;
//! the game library is under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use questforge_types::config::ServerConfig;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/games", get(handlers::library::list_games))
        .route("/games/{title}", get(handlers::library::get_game));

    Router::new()
        .route("/generate-game", post(handlers::game::generate_game))
        .route("/generate-scene", post(handlers::game::generate_scene))
        .route("/add-scene", post(handlers::game::add_scene))
        .route("/add-character", post(handlers::game::add_character))
        .route(
            "/generate-phaser-game",
            post(handlers::game::generate_phaser_game),
        )
        .route("/code-assistant", post(handlers::assistant::code_assistant))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes)
        .layer(build_cors(&server.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins, any method and header, with credentials.
///
/// A literal `"*"` entry allows every origin; browsers reject credentials
/// with a wildcard origin, so credentials are dropped in that case.
fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Json;
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use questforge_types::config::ServiceConfig;

    /// Serve a fixed chat-completions reply on an ephemeral port.
    async fn spawn_model(status: StatusCode, content: &str) -> String {
        let body = if status.is_success() {
            json!({
                "id": "gen-1",
                "model": "mock",
                "choices": [{"message": {"role": "assistant", "content": content}}]
            })
            .to_string()
        } else {
            content.to_string()
        };

        let app = Router::new().route(
            "/chat/completions",
            post(move |Json(_): Json<Value>| async move { (status, body) }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn app(base_url: String, data_dir: PathBuf) -> Router {
        let mut config = ServiceConfig::default();
        config.llm.base_url = base_url;
        config.llm.timeout_secs = 5;

        let state = AppState::build(SecretString::from("sk-test"), data_dir, &config).unwrap();
        build_router(state, &config.server)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn game_request() -> Value {
        json!({"description": "Explore a flooded cave", "genre_tags": ["adventure"]})
    }

    #[tokio::test]
    async fn test_generate_game_returns_and_persists_record() {
        let tmp = TempDir::new().unwrap();
        let url = spawn_model(StatusCode::OK, "```json\n{\"title\":\"Cave\"}\n```").await;
        let router = app(url, tmp.path().to_path_buf());

        let response = router
            .clone()
            .oneshot(post_json("/generate-game", game_request()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"title": "Cave"}));

        let stored: Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join("games.json")).unwrap())
                .unwrap();
        assert_eq!(stored, json!({"Cave": {"title": "Cave"}}));

        let response = router.oneshot(get_request("/api/v1/games/Cave")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let envelope = body_json(response).await;
        assert_eq!(envelope["data"], json!({"title": "Cave"}));
        assert_eq!(envelope["_links"]["self"], "/api/v1/games/Cave");
    }

    #[tokio::test]
    async fn test_generate_game_non_json_reply_is_returned_as_string() {
        let tmp = TempDir::new().unwrap();
        let url = spawn_model(StatusCode::OK, "Once upon a time").await;

        let response = app(url, tmp.path().to_path_buf())
            .oneshot(post_json("/generate-game", game_request()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!("Once upon a time"));
        assert!(!tmp.path().join("games.json").exists());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_reported_in_body() {
        let tmp = TempDir::new().unwrap();
        let url = spawn_model(StatusCode::INTERNAL_SERVER_ERROR, "model overloaded").await;

        let response = app(url, tmp.path().to_path_buf())
            .oneshot(post_json(
                "/generate-scene",
                json!({"game_title": "Cave", "previous_story": "The water rose."}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"error": 500, "details": "model overloaded"})
        );
    }

    #[tokio::test]
    async fn test_code_assistant_degrades_on_unstructured_reply() {
        let tmp = TempDir::new().unwrap();
        let url = spawn_model(StatusCode::OK, "Sure, here is the change.").await;

        let response = app(url, tmp.path().to_path_buf())
            .oneshot(post_json(
                "/code-assistant",
                json!({"prompt": "Make the hero faster", "files": []}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let reply = body_json(response).await;
        assert!(
            reply["message"]
                .as_str()
                .unwrap()
                .starts_with("⚠️ Error parsing assistant output: ")
        );
        assert_eq!(reply["updatedFiles"], json!([]));
    }

    #[tokio::test]
    async fn test_code_assistant_upstream_failure_is_bad_gateway() {
        let tmp = TempDir::new().unwrap();
        let url = spawn_model(StatusCode::TOO_MANY_REQUESTS, "rate limited").await;

        let response = app(url, tmp.path().to_path_buf())
            .oneshot(post_json(
                "/code-assistant",
                json!({"prompt": "anything", "files": []}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await,
            json!({"error": 429, "details": "rate limited"})
        );
    }

    #[tokio::test]
    async fn test_add_scene_acknowledges_without_model_call() {
        let tmp = TempDir::new().unwrap();
        // Nothing listens here; a model call would fail.
        let router = app("http://127.0.0.1:9".into(), tmp.path().to_path_buf());

        let response = router
            .oneshot(post_json(
                "/add-scene",
                json!({
                    "game_title": "Cave",
                    "scene_description": "Water rises",
                    "characters": ["Mira"],
                    "choices": ["Swim"]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let ack = body_json(response).await;
        assert_eq!(ack["status"], "Scene added");
        assert_eq!(ack["scene"]["description"], "Water rises");
    }

    #[tokio::test]
    async fn test_missing_game_is_404_envelope() {
        let tmp = TempDir::new().unwrap();
        let router = app("http://127.0.0.1:9".into(), tmp.path().to_path_buf());

        let response = router.oneshot(get_request("/api/v1/games/Nowhere")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let envelope = body_json(response).await;
        assert_eq!(envelope["data"], Value::Null);
        assert_eq!(envelope["errors"][0]["code"], "GAME_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_games_on_empty_store() {
        let tmp = TempDir::new().unwrap();
        let router = app("http://127.0.0.1:9".into(), tmp.path().to_path_buf());

        let response = router.oneshot(get_request("/api/v1/games")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"], json!([]));
    }

    #[tokio::test]
    async fn test_health() {
        let tmp = TempDir::new().unwrap();
        let router = app("http://127.0.0.1:9".into(), tmp.path().to_path_buf());

        let response = router.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_configured_origin() {
        let tmp = TempDir::new().unwrap();
        let router = app("http://127.0.0.1:9".into(), tmp.path().to_path_buf());

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/generate-game")
            .header(header::ORIGIN, "http://localhost:8080")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:8080"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let tmp = TempDir::new().unwrap();
        let router = app("http://127.0.0.1:9".into(), tmp.path().to_path_buf());

        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
