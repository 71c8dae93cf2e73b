//! Save-directory discovery for cwsave.
//!
//! [`DirectoryResolver`] finds the Cube World save directory by trying a
//! fixed list of [`Candidate`] strategies and returning the first hit:
//!
//! 1. **Uninstall registry**: three namespaces in fixed order
//!    ([`UninstallHive::ORDER`]). The first installed product whose display
//!    name starts with the product prefix wins, and its install location
//!    plus `Save` is returned.
//! 2. **Program Files**: `<program files (x86)>/Cube World/Save`, if it
//!    exists on disk.
//! 3. **Desktop**: `<desktop>/Cube World/Save`, if it exists on disk.
//!
//! Probing never fails: an unreadable namespace, an unopenable subkey, or a
//! missing folder just moves on to the next strategy. When nothing matches
//! the resolver returns `None` and the caller falls back to asking the user.
//!
//! # Modules
//!
//! - [`types`] — [`Candidate`], [`UninstallHive`], [`KnownFolder`]
//! - [`registry`] — The [`Registry`] capability and its backends
//! - [`host`] — The [`Host`] capability (filesystem and known folders)
//! - [`resolver`] — [`DirectoryResolver`] itself

pub mod host;
pub mod registry;
pub mod resolver;
pub mod types;

#[cfg(windows)]
pub mod windows;

pub use host::{Host, InMemoryHost, OsHost};
pub use registry::{InMemoryRegistry, NoRegistry, Registry};
pub use resolver::{system_resolver, DirectoryResolver, Resolution, SearchTerms, SystemRegistry};
pub use types::{Candidate, HiveRoot, KnownFolder, UninstallHive};

#[cfg(windows)]
pub use windows::WindowsRegistry;
