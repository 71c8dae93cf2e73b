//! SQLite-backed blob store, the on-disk format of `characters.db`.
//!
//! The database holds a single table:
//!
//! ```text
//! CREATE TABLE blobs (key TEXT PRIMARY KEY, value BLOB)
//! ```

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobStore, OpenStore};

/// Name of the key-value table inside a character database.
pub const BLOB_TABLE: &str = "blobs";

/// A character database opened from disk.
///
/// The connection is owned by the store and closed when it is dropped, so a
/// store handle never outlives the load that opened it.
pub struct SqliteBlobStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteBlobStore {
    /// Open an existing database read-only and check its layout.
    ///
    /// The file is never created. A file that is not a SQLite database, or
    /// one without a `blobs` table, fails here rather than on the first read.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::MissingFile(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        validate_layout(&conn)?;

        debug!(path = %path.display(), "opened character database");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Create (or open read-write) a database at `path`, adding the `blobs`
    /// table if it is missing.
    pub fn create(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS blobs (key TEXT PRIMARY KEY, value BLOB)",
        )?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Insert or replace the blob under `key`.
    ///
    /// Fails on a store opened with [`SqliteBlobStore::open`], which is
    /// read-only.
    pub fn write_blob(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO blobs (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// All keys in the database, sorted.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM blobs ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }

    /// Path the database was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for SqliteBlobStore {
    fn read_blob(&self, key: &str) -> StoreResult<Vec<u8>> {
        self.conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl std::fmt::Debug for SqliteBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBlobStore")
            .field("path", &self.path)
            .finish()
    }
}

/// Opens character databases from disk with [`SqliteBlobStore::open`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SqliteOpener;

impl OpenStore for SqliteOpener {
    type Store = SqliteBlobStore;

    fn open(&self, path: &Path) -> StoreResult<Self::Store> {
        SqliteBlobStore::open(path)
    }
}

fn validate_layout(conn: &Connection) -> StoreResult<()> {
    // Querying the schema also forces SQLite to read the file header, so a
    // file that is not a database fails here.
    let table = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![BLOB_TABLE],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    if table.is_none() {
        return Err(StoreError::MissingTable {
            table: BLOB_TABLE.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(dir: &Path, blobs: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join("characters.db");
        let store = SqliteBlobStore::create(&path).unwrap();
        for (key, value) in blobs {
            store.write_blob(key, value).unwrap();
        }
        path
    }

    #[test]
    fn open_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(dir.path(), &[("num", [1u8].as_slice()), ("0", b"record".as_slice())]);

        let store = SqliteBlobStore::open(&path).unwrap();
        assert_eq!(store.read_blob("num").unwrap(), vec![1u8]);
        assert_eq!(store.read_blob("0").unwrap(), b"record".to_vec());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(dir.path(), &[("num", [0u8].as_slice())]);

        let store = SqliteBlobStore::open(&path).unwrap();
        let err = store.read_blob("0").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref key } if key == "0"));
        assert!(store.contains("num").unwrap());
        assert!(!store.contains("0").unwrap());
    }

    #[test]
    fn open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SqliteBlobStore::open(dir.path().join("nope.db")).unwrap_err();
        assert!(matches!(err, StoreError::MissingFile(_)));
        // Opening must not create the file.
        assert!(!dir.path().join("nope.db").exists());
    }

    #[test]
    fn open_directory_is_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SqliteBlobStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::MissingFile(_)));
    }

    #[test]
    fn open_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("characters.db");
        std::fs::write(&path, b"this is definitely not a sqlite database, just text").unwrap();

        let err = SqliteBlobStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)));
    }

    #[test]
    fn open_without_blob_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE things (id INTEGER)").unwrap();
        }

        let err = SqliteBlobStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::MissingTable { ref table } if table == "blobs"));
    }

    #[test]
    fn opened_store_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(dir.path(), &[("num", [0u8].as_slice())]);

        let store = SqliteBlobStore::open(&path).unwrap();
        assert!(store.write_blob("num", &[5]).is_err());
        assert_eq!(store.read_blob("num").unwrap(), vec![0u8]);
    }

    #[test]
    fn keys_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(dir.path(), &[("num", [2u8].as_slice()), ("1", b"b".as_slice()), ("0", b"a".as_slice())]);
        let store = SqliteBlobStore::open(&path).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["0", "1", "num"]);
    }

    #[test]
    fn write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("characters.db");
        let store = SqliteBlobStore::create(&path).unwrap();
        store.write_blob("num", &[1]).unwrap();
        store.write_blob("num", &[3]).unwrap();
        assert_eq!(store.read_blob("num").unwrap(), vec![3u8]);
    }

    #[test]
    fn opener_delegates_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(dir.path(), &[("num", [0u8].as_slice())]);
        let store = SqliteOpener.open(&path).unwrap();
        assert!(store.contains("num").unwrap());
        assert!(SqliteOpener.open(&dir.path().join("missing.db")).is_err());
    }
}
