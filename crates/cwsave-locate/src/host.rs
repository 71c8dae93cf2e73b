//! The [`Host`] capability: filesystem checks and well-known folders.

use std::collections::{HashMap, HashSet};
use std::env;
use std::path::{Path, PathBuf};

use crate::types::KnownFolder;

/// Read-only view of the host machine.
pub trait Host {
    /// Whether `path` exists and is a directory.
    fn directory_exists(&self, path: &Path) -> bool;

    /// Whether `path` exists and is a regular file.
    fn file_exists(&self, path: &Path) -> bool;

    /// Resolve a well-known folder. `None` if the platform has no such
    /// folder or it cannot be determined.
    fn known_folder(&self, folder: KnownFolder) -> Option<PathBuf>;
}

impl<H: Host + ?Sized> Host for &H {
    fn directory_exists(&self, path: &Path) -> bool {
        (**self).directory_exists(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        (**self).file_exists(path)
    }

    fn known_folder(&self, folder: KnownFolder) -> Option<PathBuf> {
        (**self).known_folder(folder)
    }
}

/// The real machine: `std::fs` metadata, `dirs`, and the environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsHost;

impl Host for OsHost {
    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn known_folder(&self, folder: KnownFolder) -> Option<PathBuf> {
        match folder {
            // 32-bit Windows has no `ProgramFiles(x86)`; its `ProgramFiles`
            // is the 32-bit directory.
            KnownFolder::ProgramFilesX86 => env::var_os("ProgramFiles(x86)")
                .or_else(|| env::var_os("ProgramFiles"))
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            KnownFolder::Desktop => dirs::desktop_dir(),
        }
    }
}

/// A scripted host for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct InMemoryHost {
    directories: HashSet<PathBuf>,
    files: HashSet<PathBuf>,
    folders: HashMap<KnownFolder, PathBuf>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a well-known folder to `path`.
    pub fn with_folder(mut self, folder: KnownFolder, path: impl Into<PathBuf>) -> Self {
        self.folders.insert(folder, path.into());
        self
    }

    /// Mark `path` as an existing directory.
    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directories.insert(path.into());
        self
    }

    /// Mark `path` as an existing file.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }
}

impl Host for InMemoryHost {
    fn directory_exists(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn known_folder(&self, folder: KnownFolder) -> Option<PathBuf> {
        self.folders.get(&folder).cloned()
    }
}
