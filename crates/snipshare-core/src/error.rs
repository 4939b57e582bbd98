use thiserror::Error;

/// Errors raised while validating core values.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid share code: {0}")]
    InvalidCode(String),
    #[error("unknown language tag: {0}")]
    InvalidLanguage(String),
}

/// Errors surfaced by a storage backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("share code already taken: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by the share-code registry to its callers.
///
/// Not-found is deliberately absent: an absent or expired record is
/// `Ok(None)` from `lookup`, never an error the caller can use to
/// distinguish the two cases.
#[derive(Debug, Clone, Error)]
pub enum ShareError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid share code: {0}")]
    InvalidCode(String),
    #[error("share code space is exhausted")]
    CapacityExhausted,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<CoreError> for ShareError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidCode(message) => Self::InvalidCode(message),
            CoreError::InvalidLanguage(message) => Self::InvalidInput(message),
        }
    }
}

impl From<StorageError> for ShareError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value.to_string())
    }
}
