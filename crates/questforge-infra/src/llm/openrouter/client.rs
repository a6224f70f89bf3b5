//! OpenRouterProvider -- concrete [`LlmProvider`] for OpenRouter and other
//! OpenAI-compatible chat completions endpoints.
//!
//! Sends non-streaming requests to `{base_url}/chat/completions` with bearer
//! authentication plus OpenRouter's attribution headers (`HTTP-Referer`,
//! `X-Title`). Every call is bounded by the configured timeout.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use questforge_core::llm::provider::LlmProvider;
use questforge_types::config::LlmConfig;
use questforge_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// OpenRouter chat completions provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the `Authorization` header.
pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    referer: String,
    app_title: String,
}

impl OpenRouterProvider {
    /// Create a provider from the `[llm]` config section.
    pub fn new(api_key: SecretString, config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            referer: config.referer.clone(),
            app_title: config.app_title.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn to_wire_request<'a>(&'a self, request: &'a CompletionRequest) -> ChatCompletionRequest<'a> {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };

        ChatCompletionRequest {
            model,
            messages: request
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.to_string(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
        }
    }
}

// No Debug derive: keeps the client and key out of formatted output entirely.

impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[tracing::instrument(
        name = "openrouter_complete",
        skip(self, request),
        fields(model = %self.model, message_count = request.messages.len())
    )]
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_wire_request(request);
        let url = self.url("/chat/completions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Transport(format!("request timed out: {e}"))
                } else {
                    LlmError::Transport(format!("HTTP request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Completion request rejected");
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let wire: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let choice = wire.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;
        let content = choice.message.content.unwrap_or_default();

        tracing::debug!(content_len = content.len(), "Completion received");

        Ok(CompletionResponse {
            id: wire.id,
            content,
            model: wire.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use questforge_types::llm::Message;
    use serde_json::Value;

    type Captured = Arc<Mutex<Option<(HeaderMap, Value)>>>;

    /// Serve a canned chat-completions answer on an ephemeral port.
    async fn spawn_mock(status: StatusCode, body: &'static str) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(None));
        let cap = captured.clone();

        let app = Router::new().route(
            "/chat/completions",
            post(move |headers: HeaderMap, Json(request): Json<Value>| async move {
                *cap.lock().unwrap() = Some((headers, request));
                (status, body)
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), captured)
    }

    fn provider(base_url: &str) -> OpenRouterProvider {
        let config = LlmConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..LlmConfig::default()
        };
        OpenRouterProvider::new(SecretString::from("sk-test-key"), &config).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: String::new(),
            messages: vec![Message::system("be brief"), Message::user("make a game")],
            temperature: Some(0.7),
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice_content() {
        let (url, captured) = spawn_mock(
            StatusCode::OK,
            r#"{"id":"gen-1","model":"deepseek/deepseek-r1-0528:free","choices":[{"message":{"role":"assistant","content":"```json\n{\"title\":\"Cave\"}\n```"}}]}"#,
        )
        .await;

        let response = provider(&url).complete(&request()).await.unwrap();
        assert_eq!(response.id, "gen-1");
        assert_eq!(response.content, "```json\n{\"title\":\"Cave\"}\n```");

        let (headers, body) = captured.lock().unwrap().clone().unwrap();
        assert_eq!(headers["authorization"], "Bearer sk-test-key");
        assert_eq!(headers["x-title"], "AI Game Generator");
        assert_eq!(headers["http-referer"], "http://localhost:3000");
        assert_eq!(body["model"], "deepseek/deepseek-r1-0528:free");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "make a game");
    }

    #[tokio::test]
    async fn test_explicit_model_overrides_default() {
        let (url, captured) = spawn_mock(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"ok"}}]}"#,
        )
        .await;

        let mut req = request();
        req.model = "openai/gpt-4o-mini".into();
        provider(&url).complete(&req).await.unwrap();

        let (_, body) = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body["model"], "openai/gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let (url, _) = spawn_mock(StatusCode::TOO_MANY_REQUESTS, "rate limited").await;

        let err = provider(&url).complete(&request()).await.unwrap_err();
        match err {
            LlmError::Http { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let (url, _) = spawn_mock(StatusCode::OK, r#"{"id":"x","choices":[]}"#).await;
        let err = provider(&url).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_malformed_body_is_deserialization_error() {
        let (url, _) = spawn_mock(StatusCode::OK, "not json").await;
        let err = provider(&url).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider(&format!("http://{addr}"))
            .complete(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Transport(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let p = provider("https://openrouter.ai/api/v1/");
        assert_eq!(p.url("/chat/completions"), "https://openrouter.ai/api/v1/chat/completions");
        assert_eq!(p.model(), "deepseek/deepseek-r1-0528:free");
    }
}
