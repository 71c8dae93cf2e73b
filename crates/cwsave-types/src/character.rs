use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Playable character class.
///
/// The discriminants are the class ids stored in a character record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior = 1,
    Ranger = 2,
    Mage = 3,
    Rogue = 4,
}

impl CharacterClass {
    /// All classes in id order.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Warrior,
        CharacterClass::Ranger,
        CharacterClass::Mage,
        CharacterClass::Rogue,
    ];

    /// Look up a class by its stored id.
    pub fn from_id(id: u32) -> Result<Self, TypeError> {
        Self::ALL
            .into_iter()
            .find(|class| class.id() == id)
            .ok_or(TypeError::UnknownClass(id))
    }

    /// The id written into a character record.
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Human-readable class name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Ranger => "Ranger",
            Self::Mage => "Mage",
            Self::Rogue => "Rogue",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One decoded character.
///
/// `index` is the zero-based ordinal used to fetch the record from the
/// database. Within a loaded roster it is also the record's position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub index: usize,
    pub name: String,
    pub class: CharacterClass,
    pub specialization: u32,
    pub level: u32,
}

impl CharacterRecord {
    /// Blob key this record is stored under.
    pub fn key(&self) -> String {
        record_key(self.index)
    }
}

impl fmt::Display for CharacterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (level {} {})", self.name, self.level, self.class)
    }
}

/// Blob key for the character at `index`: its decimal ordinal.
pub fn record_key(index: usize) -> String {
    index.to_string()
}
