use std::path::Path;
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};

/// Key-value blob store.
///
/// All implementations must satisfy these invariants:
/// - The store never interprets blob contents; it is a pure key-value store.
/// - A missing key yields [`StoreError::NotFound`], never an empty blob.
/// - Backend failures are propagated, never silently ignored.
pub trait BlobStore {
    /// Read the blob stored under `key`.
    fn read_blob(&self, key: &str) -> StoreResult<Vec<u8>>;

    /// Check whether a blob exists under `key`.
    ///
    /// Default implementation calls `read_blob()` and maps `NotFound` to
    /// `false`. Backends may override to avoid copying the blob.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        match self.read_blob(key) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    fn read_blob(&self, key: &str) -> StoreResult<Vec<u8>> {
        (**self).read_blob(key)
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        (**self).contains(key)
    }
}

impl<S: BlobStore + ?Sized> BlobStore for Arc<S> {
    fn read_blob(&self, key: &str) -> StoreResult<Vec<u8>> {
        (**self).read_blob(key)
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        (**self).contains(key)
    }
}

/// Opens a blob store from a path.
///
/// Opening must validate the container: any failure to open or index the
/// store is reported here, before a single blob is read. The returned handle
/// is owned by the caller and released when dropped.
pub trait OpenStore {
    /// The store type produced by this opener.
    type Store: BlobStore;

    /// Open and index the store at `path`.
    fn open(&self, path: &Path) -> StoreResult<Self::Store>;
}

impl<O: OpenStore + ?Sized> OpenStore for &O {
    type Store = O::Store;

    fn open(&self, path: &Path) -> StoreResult<Self::Store> {
        (**self).open(path)
    }
}
