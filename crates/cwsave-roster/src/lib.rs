//! Character roster loading for cwsave.
//!
//! [`CharacterStoreLoader`] turns a character database into a [`Roster`]:
//!
//! 1. **Open** the blob store. Any failure is
//!    [`LoadError::StoreCorrupted`].
//! 2. **Count**: read the `num` blob. Its first byte is the authoritative
//!    character count. An absent or empty blob is also `StoreCorrupted`.
//! 3. **Enumerate** ordinals `0..count` in order, decoding each record with a
//!    [`RecordDecoder`]. The first failure aborts the load with
//!    [`LoadError::RecordCorrupted`], and every record decoded so far is
//!    discarded.
//!
//! A roster is all-or-nothing: callers either get every record, in index
//! order, or an error and no records at all.
//!
//! # Modules
//!
//! - [`error`] — [`LoadError`], [`DecodeError`], [`LoadFailure`]
//! - [`decoder`] — The [`RecordDecoder`] trait and the fixed [`LayoutDecoder`]
//! - [`roster`] — The [`Roster`] value returned by a load
//! - [`loader`] — [`CharacterStoreLoader`] itself

pub mod decoder;
pub mod error;
pub mod loader;
pub mod roster;

pub use decoder::{LayoutDecoder, RecordDecoder, RECORD_HEADER_LEN};
pub use error::{DecodeError, DecodeResult, LoadError, LoadFailure, LoadResult};
pub use loader::{read_count, CharacterStoreLoader};
pub use roster::Roster;
