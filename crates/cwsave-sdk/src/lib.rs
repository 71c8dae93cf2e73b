//! High-level SDK for cwsave.
//!
//! [`SaveBrowser`] ties the resolver and the loader together: find the save
//! directory, check for a character database, and load its roster. This is
//! the main entry point for applications embedding cwsave.

pub mod browser;
pub mod config;
pub mod error;

pub use browser::{Discovery, SaveBrowser, SystemBrowser};
pub use config::CwsaveConfig;
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use cwsave_locate::{Candidate, DirectoryResolver, Resolution, SearchTerms};
pub use cwsave_roster::{CharacterStoreLoader, LoadError, LoadFailure, Roster};
pub use cwsave_types::{CharacterClass, CharacterRecord};
