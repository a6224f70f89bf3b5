//! Game store trait.
//!
//! Defines the interface for title-keyed game record storage.
//! Implementations live in questforge-infra.

use questforge_types::error::StoreError;
use questforge_types::game::{GameRecord, GameSnapshot};

/// Trait for durable, title-keyed storage of game records.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait GameStore: Send + Sync {
    /// Get a record by title. Returns None if no record has that title.
    fn get(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Option<GameRecord>, StoreError>> + Send;

    /// Load the full snapshot.
    fn all(&self) -> impl std::future::Future<Output = Result<GameSnapshot, StoreError>> + Send;

    /// Insert the record under its title, fully replacing any prior record
    /// with the same title, and persist the whole snapshot.
    ///
    /// Fails with [`StoreError::MissingTitle`] if the record has no string title.
    fn merge_and_save(
        &self,
        record: GameRecord,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
