//! Storage error types
//!
//! Defines all errors that can occur in the storage layer.

use thiserror::Error;

/// Errors that can occur while talking to the attendance database
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite rejected a statement or the connection failed
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O operation failed (creating the database directory, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking storage task panicked or was cancelled
    #[error("Task join error: {0}")]
    TaskJoin(String),
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        StorageError::TaskJoin(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::TaskJoin("cancelled".to_string());
        assert_eq!(err.to_string(), "Task join error: cancelled");

        let err = StorageError::Sqlite(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.to_string(), "SQLite error: Query returned no rows");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }
}
