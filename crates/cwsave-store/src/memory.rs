use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobStore, OpenStore};

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. Blobs are held behind a `RwLock` and
/// cloned on read. Every `read_blob` call is counted, which lets callers
/// assert which keys a load touched.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    reads: AtomicUsize,
}

impl InMemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
            reads: AtomicUsize::new(0),
        }
    }

    /// Insert or replace the blob under `key`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.blobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    /// Remove the blob under `key`. Returns `true` if it existed.
    pub fn remove(&self, key: &str) -> bool {
        self.blobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted list of all keys in the store.
    pub fn keys(&self) -> Vec<String> {
        let map = self.blobs.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of `read_blob` calls served so far, hits and misses alike.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<Vec<u8>>> FromIterator<(K, V)> for InMemoryBlobStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let store = Self::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

impl BlobStore for InMemoryBlobStore {
    fn read_blob(&self, key: &str) -> StoreResult<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let map = self.blobs.read().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned().ok_or_else(|| StoreError::NotFound {
            key: key.to_string(),
        })
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        let map = self.blobs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(map.contains_key(key))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("blob_count", &self.len())
            .field("reads", &self.read_count())
            .finish()
    }
}

/// A path-indexed set of in-memory stores.
///
/// Opening a path that was never registered fails with
/// [`StoreError::Unregistered`], the in-memory analogue of a missing
/// database file.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    stores: RwLock<HashMap<PathBuf, Arc<InMemoryBlobStore>>>,
    opens: AtomicUsize,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `store` at `path`, returning a shared handle to it.
    pub fn register(
        &self,
        path: impl Into<PathBuf>,
        store: InMemoryBlobStore,
    ) -> Arc<InMemoryBlobStore> {
        let store = Arc::new(store);
        self.stores
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), Arc::clone(&store));
        store
    }

    /// Number of successful `open` calls so far.
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }
}

impl OpenStore for InMemoryCatalog {
    type Store = Arc<InMemoryBlobStore>;

    fn open(&self, path: &Path) -> StoreResult<Self::Store> {
        let stores = self.stores.read().unwrap_or_else(PoisonError::into_inner);
        let store = stores
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::Unregistered(path.to_path_buf()))?;
        self.opens.fetch_add(1, Ordering::Relaxed);
        debug!(path = %path.display(), blobs = store.len(), "opened in-memory store");
        Ok(store)
    }
}
