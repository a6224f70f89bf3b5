//! JSON file game store.
//!
//! Implements `GameStore` from `questforge-core` over a single pretty-printed
//! JSON object (`title -> record`). Every merge is a full
//! load -> modify -> store cycle held under one async mutex, so concurrent
//! merges inside this process cannot lose each other's updates. Writes go to a
//! sibling temp file and are renamed over the store file.
//!
//! The file is handled as a plain JSON object, so entries keep their order
//! and entries that are not game objects survive a merge untouched. Reads
//! skip such entries. A store file that is not a JSON object at all is moved
//! aside to `<file>.corrupt-<timestamp>` before the merge proceeds from an
//! empty document. Other processes writing the same file are not coordinated
//! with.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use questforge_core::store::GameStore;
use questforge_types::error::StoreError;
use questforge_types::game::{GameRecord, GameSnapshot};

/// On-disk contents: title -> arbitrary JSON, in file order.
type StoreDocument = Map<String, Value>;

/// File-backed implementation of `GameStore`.
pub struct JsonFileGameStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileGameStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file as-is. `None` when the file does not exist.
    async fn read_raw(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Load for reads: a corrupt file is an error.
    async fn load(&self) -> Result<StoreDocument, StoreError> {
        match self.read_raw().await? {
            None => Ok(StoreDocument::new()),
            Some(content) => parse_document(&content),
        }
    }

    /// Load for a merge: a corrupt file is quarantined and replaced by an empty document.
    async fn load_for_merge(&self) -> Result<StoreDocument, StoreError> {
        let Some(content) = self.read_raw().await? else {
            return Ok(StoreDocument::new());
        };

        match parse_document(&content) {
            Ok(document) => Ok(document),
            Err(err) => {
                let quarantine = self.quarantine().await?;
                tracing::warn!(
                    error = %err,
                    store = %self.path.display(),
                    quarantined_to = %quarantine.display(),
                    "Game store is unparseable; moved aside and starting from an empty store"
                );
                Ok(StoreDocument::new())
            }
        }
    }

    async fn quarantine(&self) -> Result<PathBuf, StoreError> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string();
        let target = sibling(&self.path, &format!("corrupt-{stamp}"));
        tokio::fs::rename(&self.path, &target).await?;
        Ok(target)
    }

    async fn write_document(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = sibling(&self.path, "tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// `dir/games.json` + `suffix` -> `dir/games.json.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn parse_document(content: &str) -> Result<StoreDocument, StoreError> {
    if content.trim().is_empty() {
        return Ok(StoreDocument::new());
    }
    serde_json::from_str(content).map_err(|e| StoreError::Corrupt(e.to_string()))
}

/// Game record stored under `title`, skipping entries that are not objects.
fn record_entry(title: &str, value: Value) -> Option<GameRecord> {
    let kind = json_kind(&value);
    let record = GameRecord::from_value(value);
    if record.is_none() {
        tracing::warn!(title = %title, kind, "Skipping store entry that is not a game object");
    }
    record
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl GameStore for JsonFileGameStore {
    async fn get(&self, title: &str) -> Result<Option<GameRecord>, StoreError> {
        let mut document = self.load().await?;
        Ok(document
            .remove(title)
            .and_then(|value| record_entry(title, value)))
    }

    async fn all(&self) -> Result<GameSnapshot, StoreError> {
        let document = self.load().await?;
        Ok(document
            .into_iter()
            .filter_map(|(title, value)| {
                let record = record_entry(&title, value)?;
                Some((title, record))
            })
            .collect())
    }

    async fn merge_and_save(&self, record: GameRecord) -> Result<(), StoreError> {
        let title = record.title().ok_or(StoreError::MissingTitle)?.to_string();

        let _guard = self.write_lock.lock().await;

        let mut document = self.load_for_merge().await?;
        let replaced = document.insert(title.clone(), record.into_value()).is_some();
        self.write_document(&document).await?;

        tracing::debug!(
            title = %title,
            replaced,
            total = document.len(),
            "Merged game into store"
        );
        Ok(())
    }
}
