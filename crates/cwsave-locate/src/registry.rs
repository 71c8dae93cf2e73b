//! The [`Registry`] capability: read-only access to uninstall lists.
//!
//! Every operation reports absence or failure as `None` (or an empty list).
//! Registry probing is best-effort, so nothing here returns an error.

use std::collections::HashMap;

use crate::types::UninstallHive;

/// Value holding an installed product's display name.
pub const DISPLAY_NAME: &str = "DisplayName";

/// Value holding an installed product's install directory.
pub const INSTALL_LOCATION: &str = "InstallLocation";

/// Read-only view of a registry-like namespace of installed products.
///
/// `Key` is an open handle. Handles are owned values and are released when
/// dropped, so a scan that returns early releases everything it opened.
pub trait Registry {
    /// An open registry key.
    type Key;

    /// Open the uninstall list of `hive`. `None` if it is missing or
    /// unreadable.
    fn open_uninstall(&self, hive: UninstallHive) -> Option<Self::Key>;

    /// Names of the subkeys of `key`, in enumeration order.
    fn subkey_names(&self, key: &Self::Key) -> Vec<String>;

    /// Open the subkey `name` of `parent`. `None` if it cannot be opened.
    fn open_subkey(&self, parent: &Self::Key, name: &str) -> Option<Self::Key>;

    /// Read the string value `name` of `key`. `None` if absent or not a
    /// string.
    fn string_value(&self, key: &Self::Key, name: &str) -> Option<String>;
}

impl<R: Registry + ?Sized> Registry for &R {
    type Key = R::Key;

    fn open_uninstall(&self, hive: UninstallHive) -> Option<Self::Key> {
        (**self).open_uninstall(hive)
    }

    fn subkey_names(&self, key: &Self::Key) -> Vec<String> {
        (**self).subkey_names(key)
    }

    fn open_subkey(&self, parent: &Self::Key, name: &str) -> Option<Self::Key> {
        (**self).open_subkey(parent, name)
    }

    fn string_value(&self, key: &Self::Key, name: &str) -> Option<String> {
        (**self).string_value(key, name)
    }
}

/// A registry with no namespaces, for platforms without one.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRegistry;

impl Registry for NoRegistry {
    type Key = ();

    fn open_uninstall(&self, _hive: UninstallHive) -> Option<()> {
        None
    }

    fn subkey_names(&self, _key: &()) -> Vec<String> {
        Vec::new()
    }

    fn open_subkey(&self, _parent: &(), _name: &str) -> Option<()> {
        None
    }

    fn string_value(&self, _key: &(), _name: &str) -> Option<String> {
        None
    }
}

/// A subkey of an in-memory uninstall list.
#[derive(Clone, Debug)]
struct Subkey {
    name: String,
    /// `None` marks a subkey that exists but cannot be opened.
    values: Option<HashMap<String, String>>,
}

/// Handle into an [`InMemoryRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InMemoryKey {
    List(UninstallHive),
    Entry(UninstallHive, usize),
}

/// An in-memory registry for tests and embedding.
///
/// Subkeys enumerate in insertion order. A hive is present once anything
/// has been added to it, including through [`InMemoryRegistry::add_hive`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryRegistry {
    hives: HashMap<UninstallHive, Vec<Subkey>>,
}

impl InMemoryRegistry {
    /// Create a registry with no namespaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `hive` present, with no subkeys yet.
    pub fn add_hive(&mut self, hive: UninstallHive) -> &mut Self {
        self.hives.entry(hive).or_default();
        self
    }

    /// Add an installed-product subkey with the given values.
    pub fn add_product(
        &mut self,
        hive: UninstallHive,
        subkey: &str,
        display_name: Option<&str>,
        install_location: Option<&str>,
    ) -> &mut Self {
        let mut values = HashMap::new();
        if let Some(display_name) = display_name {
            values.insert(DISPLAY_NAME.to_string(), display_name.to_string());
        }
        if let Some(install_location) = install_location {
            values.insert(INSTALL_LOCATION.to_string(), install_location.to_string());
        }
        self.hives.entry(hive).or_default().push(Subkey {
            name: subkey.to_string(),
            values: Some(values),
        });
        self
    }

    /// Add a subkey that is listed but cannot be opened.
    pub fn add_locked_subkey(&mut self, hive: UninstallHive, subkey: &str) -> &mut Self {
        self.hives.entry(hive).or_default().push(Subkey {
            name: subkey.to_string(),
            values: None,
        });
        self
    }
}

impl Registry for InMemoryRegistry {
    type Key = InMemoryKey;

    fn open_uninstall(&self, hive: UninstallHive) -> Option<InMemoryKey> {
        self.hives.contains_key(&hive).then_some(InMemoryKey::List(hive))
    }

    fn subkey_names(&self, key: &InMemoryKey) -> Vec<String> {
        match key {
            InMemoryKey::List(hive) => self
                .hives
                .get(hive)
                .map(|subkeys| subkeys.iter().map(|s| s.name.clone()).collect())
                .unwrap_or_default(),
            InMemoryKey::Entry(..) => Vec::new(),
        }
    }

    fn open_subkey(&self, parent: &InMemoryKey, name: &str) -> Option<InMemoryKey> {
        let InMemoryKey::List(hive) = *parent else {
            return None;
        };
        let subkeys = self.hives.get(&hive)?;
        let index = subkeys.iter().position(|s| s.name == name)?;
        subkeys[index]
            .values
            .as_ref()
            .map(|_| InMemoryKey::Entry(hive, index))
    }

    fn string_value(&self, key: &InMemoryKey, name: &str) -> Option<String> {
        let InMemoryKey::Entry(hive, index) = *key else {
            return None;
        };
        self.hives
            .get(&hive)?
            .get(index)?
            .values
            .as_ref()?
            .get(name)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_hive_does_not_open() {
        let registry = InMemoryRegistry::new();
        assert!(registry.open_uninstall(UninstallHive::LocalMachine).is_none());
    }

    #[test]
    fn empty_hive_opens() {
        let mut registry = InMemoryRegistry::new();
        registry.add_hive(UninstallHive::CurrentUser);
        let key = registry.open_uninstall(UninstallHive::CurrentUser).unwrap();
        assert!(registry.subkey_names(&key).is_empty());
    }

    #[test]
    fn subkeys_enumerate_in_insertion_order() {
        let mut registry = InMemoryRegistry::new();
        registry
            .add_product(UninstallHive::LocalMachine, "zeta", Some("Zeta"), None)
            .add_locked_subkey(UninstallHive::LocalMachine, "locked")
            .add_product(UninstallHive::LocalMachine, "alpha", Some("Alpha"), None);

        let list = registry.open_uninstall(UninstallHive::LocalMachine).unwrap();
        assert_eq!(registry.subkey_names(&list), vec!["zeta", "locked", "alpha"]);
    }

    #[test]
    fn values_are_read_from_opened_subkeys() {
        let mut registry = InMemoryRegistry::new();
        registry.add_product(
            UninstallHive::LocalMachine,
            "{cw}",
            Some("Cube World"),
            Some(r"C:\Games\Cube World"),
        );

        let list = registry.open_uninstall(UninstallHive::LocalMachine).unwrap();
        let entry = registry.open_subkey(&list, "{cw}").unwrap();
        assert_eq!(
            registry.string_value(&entry, DISPLAY_NAME).as_deref(),
            Some("Cube World")
        );
        assert_eq!(
            registry.string_value(&entry, INSTALL_LOCATION).as_deref(),
            Some(r"C:\Games\Cube World")
        );
        assert!(registry.string_value(&entry, "Publisher").is_none());
        // Lists carry no values.
        assert!(registry.string_value(&list, DISPLAY_NAME).is_none());
    }

    #[test]
    fn locked_and_unknown_subkeys_do_not_open() {
        let mut registry = InMemoryRegistry::new();
        registry.add_locked_subkey(UninstallHive::CurrentUser, "locked");
        let list = registry.open_uninstall(UninstallHive::CurrentUser).unwrap();
        assert!(registry.open_subkey(&list, "locked").is_none());
        assert!(registry.open_subkey(&list, "unknown").is_none());
    }

    #[test]
    fn no_registry_is_empty() {
        for hive in UninstallHive::ORDER {
            assert!(NoRegistry.open_uninstall(hive).is_none());
        }
    }
}
