use std::path::PathBuf;

use cwsave_types::{INSTALL_DIR_NAME, PRODUCT_PREFIX, SAVE_DIR_NAME};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::host::{Host, OsHost};
use crate::registry::{Registry, DISPLAY_NAME, INSTALL_LOCATION};
use crate::types::{Candidate, KnownFolder, UninstallHive};

/// Names the resolver searches for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerms {
    /// Case-sensitive prefix of the product's uninstall display name.
    pub product_prefix: String,
    /// Install directory name under a well-known folder.
    pub install_dir_name: String,
    /// Save directory name under the install directory.
    pub save_dir_name: String,
}

impl Default for SearchTerms {
    fn default() -> Self {
        Self {
            product_prefix: PRODUCT_PREFIX.to_string(),
            install_dir_name: INSTALL_DIR_NAME.to_string(),
            save_dir_name: SAVE_DIR_NAME.to_string(),
        }
    }
}

/// A resolved save directory and the strategy that found it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub candidate: Candidate,
    pub path: PathBuf,
}

/// Outcome of scanning one uninstall list.
enum HiveScan {
    NoMatch,
    Found(PathBuf),
    /// A product matched but has no install location.
    Unusable,
}

/// Finds the save directory by trying [`Candidate::ORDER`] in turn.
///
/// Resolution is read-only and never fails: every probing error counts as a
/// miss for that candidate.
#[derive(Clone, Debug)]
pub struct DirectoryResolver<R, H> {
    registry: R,
    host: H,
    terms: SearchTerms,
}

impl<R: Registry, H: Host> DirectoryResolver<R, H> {
    /// Create a resolver with the default [`SearchTerms`].
    pub fn new(registry: R, host: H) -> Self {
        Self {
            registry,
            host,
            terms: SearchTerms::default(),
        }
    }

    /// Replace the search terms.
    pub fn with_terms(mut self, terms: SearchTerms) -> Self {
        self.terms = terms;
        self
    }

    pub fn terms(&self) -> &SearchTerms {
        &self.terms
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Best-guess save directory, or `None` if no candidate matched.
    pub fn resolve(&self) -> Option<PathBuf> {
        self.resolve_with_source().map(|resolution| resolution.path)
    }

    /// Like [`DirectoryResolver::resolve`], also reporting which candidate
    /// matched.
    ///
    /// The first product in the registry whose display name matches ends the
    /// registry phase. If it has no install location, the remaining
    /// namespaces are not consulted and the well-known folders are tried.
    pub fn resolve_with_source(&self) -> Option<Resolution> {
        let mut registry_settled = false;
        for candidate in Candidate::ORDER {
            let hit = match candidate {
                Candidate::Registry(hive) if registry_settled => {
                    debug!(%hive, "registry already matched; not scanning");
                    None
                }
                Candidate::Registry(hive) => match self.scan_hive(hive) {
                    HiveScan::Found(path) => Some(path),
                    HiveScan::Unusable => {
                        registry_settled = true;
                        None
                    }
                    HiveScan::NoMatch => None,
                },
                Candidate::KnownFolder(folder) => self.probe_folder(folder),
            };
            if let Some(path) = hit {
                info!(%candidate, path = %path.display(), "resolved save directory");
                return Some(Resolution { candidate, path });
            }
            debug!(%candidate, "candidate did not match");
        }
        info!("save directory not found");
        None
    }

    /// Evaluate a single candidate.
    pub fn try_candidate(&self, candidate: Candidate) -> Option<PathBuf> {
        match candidate {
            Candidate::Registry(hive) => match self.scan_hive(hive) {
                HiveScan::Found(path) => Some(path),
                HiveScan::Unusable | HiveScan::NoMatch => None,
            },
            Candidate::KnownFolder(folder) => self.probe_folder(folder),
        }
    }

    /// Scan one uninstall list. The first subkey whose display name starts
    /// with the product prefix ends the scan, usable or not.
    fn scan_hive(&self, hive: UninstallHive) -> HiveScan {
        let Some(list) = self.registry.open_uninstall(hive) else {
            debug!(%hive, "uninstall list not present");
            return HiveScan::NoMatch;
        };

        for name in self.registry.subkey_names(&list) {
            let Some(entry) = self.registry.open_subkey(&list, &name) else {
                debug!(%hive, subkey = %name, "skipping unreadable subkey");
                continue;
            };
            let Some(display_name) = self.registry.string_value(&entry, DISPLAY_NAME) else {
                continue;
            };
            if display_name.is_empty() || !display_name.starts_with(&self.terms.product_prefix) {
                continue;
            }

            return match self
                .registry
                .string_value(&entry, INSTALL_LOCATION)
                .filter(|location| !location.is_empty())
            {
                Some(location) => {
                    debug!(%hive, subkey = %name, %display_name, "matched installed product");
                    HiveScan::Found(PathBuf::from(location).join(&self.terms.save_dir_name))
                }
                None => {
                    debug!(%hive, subkey = %name, "matching product has no install location");
                    HiveScan::Unusable
                }
            };
        }
        HiveScan::NoMatch
    }

    /// Probe `<folder>/<install dir>/<save dir>` on disk.
    fn probe_folder(&self, folder: KnownFolder) -> Option<PathBuf> {
        let Some(base) = self.host.known_folder(folder) else {
            debug!(%folder, "known folder unavailable");
            return None;
        };
        let path = base
            .join(&self.terms.install_dir_name)
            .join(&self.terms.save_dir_name);
        self.host.directory_exists(&path).then_some(path)
    }
}

/// Registry backend for the current platform.
#[cfg(windows)]
pub type SystemRegistry = crate::windows::WindowsRegistry;

/// Registry backend for the current platform.
#[cfg(not(windows))]
pub type SystemRegistry = crate::registry::NoRegistry;

/// A resolver over the real registry and filesystem.
pub fn system_resolver() -> DirectoryResolver<SystemRegistry, OsHost> {
    DirectoryResolver::new(SystemRegistry::default(), OsHost)
}
