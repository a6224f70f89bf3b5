//! Infrastructure layer for QuestForge.
//!
//! Contains implementations of the port traits defined in `questforge-core`:
//! the OpenRouter chat-completions client and the JSON file game store, plus
//! configuration loading, data directory resolution and API key lookup.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
pub mod store;
