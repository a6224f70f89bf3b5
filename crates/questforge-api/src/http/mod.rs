//! HTTP layer for QuestForge.
//!
//! Serves the generation endpoints at the root and a read-only game library
//! under `/api/v1/` in the envelope response format.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
