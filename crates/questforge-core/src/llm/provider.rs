//! LlmProvider trait definition.
//!
//! The seam between the game design service and the remote completion
//! service. Uses RPITIT (native async fn in traits, Rust 2024 edition).

use questforge_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends.
///
/// Single-turn and stateless: every call carries the whole conversation.
/// Implementations live in questforge-infra (e.g., `OpenRouterProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Model used when a request leaves `model` empty.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
