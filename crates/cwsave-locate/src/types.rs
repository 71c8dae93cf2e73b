//! Strategy and namespace identifiers for save-directory discovery.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Uninstall path shared by the 32-bit local-machine and current-user views.
const UNINSTALL_PATH: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";

/// Uninstall path of the WOW64 local-machine view.
const UNINSTALL_PATH_WOW64: &str =
    r"SOFTWARE\Wow6432Node\Microsoft\Windows\CurrentVersion\Uninstall";

/// Registry root a namespace lives under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HiveRoot {
    LocalMachine,
    CurrentUser,
}

/// One uninstall-list namespace of the system registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UninstallHive {
    /// Local-machine list under `Wow6432Node` (registry-64).
    LocalMachineWow64,
    /// Local-machine list (registry-32).
    LocalMachine,
    /// Current-user list.
    CurrentUser,
}

impl UninstallHive {
    /// Fixed query order. Earlier namespaces shadow later ones.
    pub const ORDER: [UninstallHive; 3] = [
        UninstallHive::LocalMachineWow64,
        UninstallHive::LocalMachine,
        UninstallHive::CurrentUser,
    ];

    /// Root key of this namespace.
    pub fn root(self) -> HiveRoot {
        match self {
            Self::LocalMachineWow64 | Self::LocalMachine => HiveRoot::LocalMachine,
            Self::CurrentUser => HiveRoot::CurrentUser,
        }
    }

    /// Path of the uninstall list below [`UninstallHive::root`].
    pub fn path(self) -> &'static str {
        match self {
            Self::LocalMachineWow64 => UNINSTALL_PATH_WOW64,
            Self::LocalMachine | Self::CurrentUser => UNINSTALL_PATH,
        }
    }

    /// Short strategy name used in logs and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            Self::LocalMachineWow64 => "registry-64",
            Self::LocalMachine => "registry-32",
            Self::CurrentUser => "registry-current-user",
        }
    }
}

impl fmt::Display for UninstallHive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A well-known parent folder that may hold the game install.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnownFolder {
    /// The 32-bit program files directory (`ProgramFiles(x86)`).
    ProgramFilesX86,
    /// The user's desktop directory.
    Desktop,
}

impl KnownFolder {
    pub fn name(self) -> &'static str {
        match self {
            Self::ProgramFilesX86 => "program-files",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for KnownFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One directory-lookup strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Candidate {
    /// Scan an uninstall list for the product.
    Registry(UninstallHive),
    /// Probe `<folder>/Cube World/Save` on disk.
    KnownFolder(KnownFolder),
}

impl Candidate {
    /// Fixed evaluation order. The first candidate to produce a path wins.
    pub const ORDER: [Candidate; 5] = [
        Candidate::Registry(UninstallHive::LocalMachineWow64),
        Candidate::Registry(UninstallHive::LocalMachine),
        Candidate::Registry(UninstallHive::CurrentUser),
        Candidate::KnownFolder(KnownFolder::ProgramFilesX86),
        Candidate::KnownFolder(KnownFolder::Desktop),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Registry(hive) => hive.name(),
            Self::KnownFolder(folder) => folder.name(),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_precedes_folders() {
        let names: Vec<&str> = Candidate::ORDER.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "registry-64",
                "registry-32",
                "registry-current-user",
                "program-files",
                "desktop"
            ]
        );
    }

    #[test]
    fn candidate_order_covers_every_hive() {
        for (hive, candidate) in UninstallHive::ORDER.iter().zip(Candidate::ORDER.iter()) {
            assert_eq!(*candidate, Candidate::Registry(*hive));
        }
    }

    #[test]
    fn hive_paths_and_roots() {
        assert_eq!(UninstallHive::LocalMachineWow64.root(), HiveRoot::LocalMachine);
        assert!(UninstallHive::LocalMachineWow64.path().contains("Wow6432Node"));
        assert_eq!(UninstallHive::LocalMachine.root(), HiveRoot::LocalMachine);
        assert!(!UninstallHive::LocalMachine.path().contains("Wow6432Node"));
        assert_eq!(UninstallHive::CurrentUser.root(), HiveRoot::CurrentUser);
        assert_eq!(UninstallHive::CurrentUser.path(), UninstallHive::LocalMachine.path());
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(UninstallHive::CurrentUser.to_string(), "registry-current-user");
        assert_eq!(KnownFolder::Desktop.to_string(), "desktop");
        assert_eq!(Candidate::KnownFolder(KnownFolder::ProgramFilesX86).to_string(), "program-files");
    }
}
