//! Service layer for QuestForge.
//!
//! Services are generic over the provider and store traits; the application
//! crate pins them to the concrete infra implementations.

pub mod game;
