use std::path::{Path, PathBuf};

use cwsave_locate::{
    DirectoryResolver, Host, KnownFolder, OsHost, Registry, Resolution, SystemRegistry,
};
use cwsave_roster::{CharacterStoreLoader, LayoutDecoder, RecordDecoder, Roster};
use cwsave_store::{OpenStore, SqliteOpener};
use cwsave_types::DATABASE_FILE;
use tracing::{debug, info};

use crate::config::CwsaveConfig;
use crate::error::SdkResult;

/// Outcome of [`SaveBrowser::discover`] when nothing failed to load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Discovery {
    /// No candidate produced a save directory.
    NotFound,
    /// A save directory was found but holds no character database.
    NoDatabase(PathBuf),
    /// The database in `dir` loaded completely.
    Loaded { dir: PathBuf, roster: Roster },
}

/// Finds the save directory and loads the characters in it.
pub struct SaveBrowser<R, H, O, D = LayoutDecoder> {
    resolver: DirectoryResolver<R, H>,
    loader: CharacterStoreLoader<O, D>,
    database_file: String,
}

/// A browser over the real registry, filesystem and SQLite databases.
pub type SystemBrowser = SaveBrowser<SystemRegistry, OsHost, SqliteOpener, LayoutDecoder>;

impl SaveBrowser<SystemRegistry, OsHost, SqliteOpener, LayoutDecoder> {
    pub fn system(config: &CwsaveConfig) -> Self {
        let resolver = DirectoryResolver::new(SystemRegistry::default(), OsHost)
            .with_terms(config.search_terms());
        Self::new(resolver, CharacterStoreLoader::sqlite())
            .with_database_file(config.database_file.clone())
    }
}

impl<R, H, O, D> SaveBrowser<R, H, O, D>
where
    R: Registry,
    H: Host,
    O: OpenStore,
    D: RecordDecoder,
{
    pub fn new(resolver: DirectoryResolver<R, H>, loader: CharacterStoreLoader<O, D>) -> Self {
        Self {
            resolver,
            loader,
            database_file: DATABASE_FILE.to_string(),
        }
    }

    /// Replace the database file name looked for inside the save directory.
    pub fn with_database_file(mut self, name: impl Into<String>) -> Self {
        self.database_file = name.into();
        self
    }

    pub fn resolver(&self) -> &DirectoryResolver<R, H> {
        &self.resolver
    }

    /// The save directory and the candidate that produced it.
    pub fn locate(&self) -> Option<Resolution> {
        self.resolver.resolve_with_source()
    }

    /// Path of the character database inside `dir`.
    pub fn database_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.database_file)
    }

    /// Resolve the save directory and load its database, if it has one.
    ///
    /// A missing directory or database is a [`Discovery`] variant, not an
    /// error. Only a database that exists and fails to load is an error.
    pub fn discover(&self) -> SdkResult<Discovery> {
        let Some(dir) = self.resolver.resolve() else {
            return Ok(Discovery::NotFound);
        };

        let database = self.database_path(&dir);
        if !self.resolver.host().file_exists(&database) {
            debug!(path = %database.display(), "save directory has no character database");
            return Ok(Discovery::NoDatabase(dir));
        }

        let roster = self.loader.load(&database)?;
        info!(dir = %dir.display(), characters = roster.len(), "discovered characters");
        Ok(Discovery::Loaded { dir, roster })
    }

    /// Load a database the user picked by hand.
    pub fn load_database(&self, path: impl AsRef<Path>) -> SdkResult<Roster> {
        Ok(self.loader.load(path)?)
    }

    /// Where a manual database search should start.
    pub fn browse_start_dir(&self) -> Option<PathBuf> {
        self.resolver.host().known_folder(KnownFolder::ProgramFilesX86)
    }
}
