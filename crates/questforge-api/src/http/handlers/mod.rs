//! Request handlers, grouped by resource.

pub mod assistant;
pub mod game;
pub mod library;
