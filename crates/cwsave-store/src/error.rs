use std::path::PathBuf;

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested key is not present in the store.
    #[error("blob not found: {key}")]
    NotFound { key: String },

    /// The database file does not exist or is not a regular file.
    #[error("database file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// The container opened but lacks the expected table.
    #[error("database has no `{table}` table")]
    MissingTable { table: String },

    /// The blob under `key` exists but its contents are malformed.
    #[error("corrupt blob {key}: {reason}")]
    CorruptBlob { key: String, reason: String },

    /// No store is registered at this path (in-memory catalogs only).
    #[error("no store registered at {}", .0.display())]
    Unregistered(PathBuf),

    /// Error from the SQLite backend (malformed file, I/O, query failure).
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
