//! Key-value blob storage for cwsave.
//!
//! A character database is a flat map from string keys to raw byte blobs.
//! The store never interprets blob contents; decoding is the caller's job.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait, and are opened through an
//! [`OpenStore`] implementation:
//!
//! - [`SqliteBlobStore`] — the on-disk `characters.db` format (opened by
//!   [`SqliteOpener`])
//! - [`InMemoryBlobStore`] — `HashMap`-based store for tests and embedding
//!   (opened by [`InMemoryCatalog`])
//!
//! # Design Rules
//!
//! 1. Opening a store validates the container; a store that opens is readable.
//! 2. A store handle lives for one load and is dropped on every exit path.
//! 3. An absent key is an error ([`StoreError::NotFound`]), not an empty blob.
//! 4. All backend errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryBlobStore, InMemoryCatalog};
pub use sqlite::{SqliteBlobStore, SqliteOpener, BLOB_TABLE};
pub use traits::{BlobStore, OpenStore};
