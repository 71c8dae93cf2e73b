use cwsave_types::CharacterRecord;
use serde::Serialize;

/// The characters of one successfully loaded database.
///
/// Records are in ordinal order: `roster.characters()[i].index == i`.
/// A roster is only built from a complete load, so it is never partial.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    characters: Vec<CharacterRecord>,
}

impl Roster {
    pub(crate) fn from_complete(characters: Vec<CharacterRecord>) -> Self {
        debug_assert!(characters.iter().enumerate().all(|(i, c)| c.index == i));
        Self { characters }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn characters(&self) -> &[CharacterRecord] {
        &self.characters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CharacterRecord> {
        self.characters.iter()
    }

    /// The character at list position `index`, or `None` when out of range.
    pub fn select(&self, index: usize) -> Option<&CharacterRecord> {
        self.characters.get(index)
    }

    /// Display names in roster order.
    pub fn names(&self) -> Vec<&str> {
        self.characters.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<CharacterRecord> {
        self.characters
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a CharacterRecord;
    type IntoIter = std::slice::Iter<'a, CharacterRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.characters.iter()
    }
}

impl IntoIterator for Roster {
    type Item = CharacterRecord;
    type IntoIter = std::vec::IntoIter<CharacterRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.characters.into_iter()
    }
}
