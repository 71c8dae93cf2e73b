//! Error types for roster loading.

use std::fmt;
use std::path::PathBuf;

use cwsave_store::StoreError;
use cwsave_types::TypeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single character record could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The record's blob is not in the store.
    #[error("record blob `{key}` is missing")]
    Missing { key: String },

    /// The blob is shorter than the fixed record header.
    #[error("record is {len} bytes, need at least {need}")]
    Truncated { len: usize, need: usize },

    /// The name field is not valid UTF-8.
    #[error("character name is not valid UTF-8")]
    InvalidName,

    /// The class id is not a known class.
    #[error("invalid class: {0}")]
    Class(#[from] TypeError),

    /// The decoder produced a record for a different ordinal.
    #[error("decoder returned record {found} when asked for {expected}")]
    WrongOrdinal { expected: usize, found: usize },

    /// The store failed while reading the record.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for DecodeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { key } => Self::Missing { key },
            other => Self::Store(other),
        }
    }
}

/// Convenience type alias for record decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A classified load failure.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The database could not be opened, or its count blob is unreadable.
    #[error("database {} is corrupted: {source}", .path.display())]
    StoreCorrupted {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    /// The database opened but the record at `index` failed to decode. No
    /// records are returned.
    #[error("character record {index} is corrupted: {source}")]
    RecordCorrupted {
        index: usize,
        #[source]
        source: DecodeError,
    },
}

impl LoadError {
    /// The failure class, without its details.
    pub fn kind(&self) -> LoadFailure {
        match self {
            Self::StoreCorrupted { .. } => LoadFailure::StoreCorrupted,
            Self::RecordCorrupted { .. } => LoadFailure::RecordCorrupted,
        }
    }
}

/// Coarse classification of a [`LoadError`], for presenting "bad file" and
/// "bad record" differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadFailure {
    StoreCorrupted,
    RecordCorrupted,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreCorrupted => f.write_str("store-corrupted"),
            Self::RecordCorrupted => f.write_str("record-corrupted"),
        }
    }
}

/// Convenience type alias for roster loading.
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_becomes_missing() {
        let err: DecodeError = StoreError::NotFound { key: "3".into() }.into();
        assert!(matches!(err, DecodeError::Missing { ref key } if key == "3"));
    }

    #[test]
    fn other_store_errors_are_wrapped() {
        let err: DecodeError = StoreError::MissingTable { table: "blobs".into() }.into();
        assert!(matches!(err, DecodeError::Store(StoreError::MissingTable { .. })));
    }

    #[test]
    fn kinds_and_messages() {
        let store = LoadError::StoreCorrupted {
            path: PathBuf::from("characters.db"),
            source: StoreError::MissingFile(PathBuf::from("characters.db")),
        };
        assert_eq!(store.kind(), LoadFailure::StoreCorrupted);
        assert!(store.to_string().starts_with("database characters.db is corrupted"));

        let record = LoadError::RecordCorrupted {
            index: 1,
            source: DecodeError::InvalidName,
        };
        assert_eq!(record.kind(), LoadFailure::RecordCorrupted);
        assert_eq!(
            record.to_string(),
            "character record 1 is corrupted: character name is not valid UTF-8"
        );
        assert_eq!(LoadFailure::RecordCorrupted.to_string(), "record-corrupted");
    }
}
