//! OpenRouter (OpenAI-compatible chat completions) provider.

mod client;
pub mod types;

pub use client::OpenRouterProvider;
