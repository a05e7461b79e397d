use thiserror::Error;

/// Errors that can occur when interacting with a repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No row exists with the given id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    /// A row with the given id already exists.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: u64 },
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StoreError>;
