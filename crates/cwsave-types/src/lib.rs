//! Foundation types for cwsave.
//!
//! This crate holds the value types shared by every other cwsave crate: the
//! decoded [`CharacterRecord`], its [`CharacterClass`], and the fixed names
//! that describe where Cube World keeps its save data.
//!
//! # Key Types
//!
//! - [`CharacterRecord`] — One decoded character, keyed by its ordinal index
//! - [`CharacterClass`] — The four playable classes
//! - [`constants`] — Product prefix, directory names, and blob keys

pub mod character;
pub mod constants;
pub mod error;

pub use character::{record_key, CharacterClass, CharacterRecord};
pub use constants::{
    COUNT_KEY, DATABASE_FILE, INSTALL_DIR_NAME, NAME_FIELD_LEN, PRODUCT_PREFIX, SAVE_DIR_NAME,
};
pub use error::TypeError;
