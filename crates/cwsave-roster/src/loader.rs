use std::path::Path;

use cwsave_store::{BlobStore, OpenStore, SqliteOpener, StoreError, StoreResult};
use cwsave_types::COUNT_KEY;
use tracing::{debug, info, warn};

use crate::decoder::{LayoutDecoder, RecordDecoder};
use crate::error::{DecodeError, LoadError, LoadResult};
use crate::roster::Roster;

/// Loads the full character roster from a database.
///
/// The loader keeps no state between calls: every [`load`] opens its own
/// store handle and builds a fresh roster, and the handle is dropped before
/// `load` returns on every path.
///
/// [`load`]: CharacterStoreLoader::load
#[derive(Clone, Debug)]
pub struct CharacterStoreLoader<O, D = LayoutDecoder> {
    opener: O,
    decoder: D,
}

impl CharacterStoreLoader<SqliteOpener, LayoutDecoder> {
    /// A loader for `characters.db` files on disk.
    pub fn sqlite() -> Self {
        Self::new(SqliteOpener, LayoutDecoder)
    }
}

impl Default for CharacterStoreLoader<SqliteOpener, LayoutDecoder> {
    fn default() -> Self {
        Self::sqlite()
    }
}

impl<O: OpenStore, D: RecordDecoder> CharacterStoreLoader<O, D> {
    pub fn new(opener: O, decoder: D) -> Self {
        Self { opener, decoder }
    }

    /// Load every character from the database at `path`.
    ///
    /// Returns [`LoadError::StoreCorrupted`] if the store cannot be opened or
    /// its count is unreadable, and [`LoadError::RecordCorrupted`] if any
    /// record fails to decode. In both cases no records are returned.
    pub fn load(&self, path: impl AsRef<Path>) -> LoadResult<Roster> {
        let path = path.as_ref();

        let store = self
            .opener
            .open(path)
            .map_err(|source| store_corrupted(path, source))?;

        let count = read_count(&store).map_err(|source| store_corrupted(path, source))?;
        debug!(path = %path.display(), count, "reading character records");

        let mut characters = Vec::with_capacity(count);
        for index in 0..count {
            let decoded = self.decoder.decode(index, &store).and_then(|record| {
                if record.index == index {
                    Ok(record)
                } else {
                    Err(DecodeError::WrongOrdinal {
                        expected: index,
                        found: record.index,
                    })
                }
            });
            match decoded {
                Ok(record) => characters.push(record),
                Err(source) => {
                    warn!(
                        path = %path.display(),
                        index,
                        discarded = characters.len(),
                        error = %source,
                        "character record corrupted; discarding roster"
                    );
                    return Err(LoadError::RecordCorrupted { index, source });
                }
            }
        }

        info!(path = %path.display(), count, "loaded character roster");
        Ok(Roster::from_complete(characters))
    }
}

/// Read the authoritative character count: the first byte of the `num` blob.
///
/// An absent key is [`StoreError::NotFound`]. An empty blob is
/// [`StoreError::CorruptBlob`]. Neither is treated as zero characters.
pub fn read_count(store: &dyn BlobStore) -> StoreResult<usize> {
    let blob = store.read_blob(COUNT_KEY)?;
    match blob.first() {
        Some(&count) => Ok(usize::from(count)),
        None => Err(StoreError::CorruptBlob {
            key: COUNT_KEY.to_string(),
            reason: "count blob is empty".into(),
        }),
    }
}

fn store_corrupted(path: &Path, source: StoreError) -> LoadError {
    warn!(path = %path.display(), error = %source, "character database corrupted");
    LoadError::StoreCorrupted {
        path: path.to_path_buf(),
        source,
    }
}
