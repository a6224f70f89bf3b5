//! Business logic and port traits for QuestForge.
//!
//! This crate defines the "ports" (`LlmProvider`, `GameStore`) that the
//! infrastructure layer implements, the extraction logic that turns raw model
//! output into structured data, and the game design service that ties them
//! together. It depends only on `questforge-types` -- never on
//! `questforge-infra` or any network/IO crate.

pub mod extract;
pub mod llm;
pub mod prompt;
pub mod service;
pub mod store;
