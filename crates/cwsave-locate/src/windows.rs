//! The Windows registry, read through `winreg`.

use tracing::debug;
use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ};
use winreg::RegKey;

use crate::registry::Registry;
use crate::types::{HiveRoot, UninstallHive};

/// Read-only access to the system registry.
///
/// Keys are opened with `KEY_READ` and closed when their [`RegKey`] drops.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowsRegistry;

impl Registry for WindowsRegistry {
    type Key = RegKey;

    fn open_uninstall(&self, hive: UninstallHive) -> Option<RegKey> {
        let root = match hive.root() {
            HiveRoot::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
            HiveRoot::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
        };
        match root.open_subkey_with_flags(hive.path(), KEY_READ) {
            Ok(key) => Some(key),
            Err(e) => {
                debug!(%hive, error = %e, "cannot open uninstall list");
                None
            }
        }
    }

    fn subkey_names(&self, key: &RegKey) -> Vec<String> {
        key.enum_keys().filter_map(Result::ok).collect()
    }

    fn open_subkey(&self, parent: &RegKey, name: &str) -> Option<RegKey> {
        parent.open_subkey_with_flags(name, KEY_READ).ok()
    }

    fn string_value(&self, key: &RegKey, name: &str) -> Option<String> {
        key.get_value::<String, _>(name).ok()
    }
}
