//! Shared domain types for QuestForge.
//!
//! This crate contains the data shapes that flow between the HTTP layer, the
//! game design service and the infrastructure adapters: game records, the
//! code-assistant reply, LLM request/response types, configuration, and the
//! error types shared across crates.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod game;
pub mod llm;
