use thiserror::Error;

use crate::llm::LlmError;

/// Errors from the game store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record has no string 'title' field")]
    MissingTitle,

    #[error("store file is corrupt: {0}")]
    Corrupt(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a two-section assistant reply could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssistantParseError {
    #[error("missing '--- updatedFiles ---' section")]
    SectionMissing,

    #[error("malformed updated file list: {0}")]
    MalformedFileList(String),
}

/// Errors from a model-backed game design operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
