//! Fixed names describing the Cube World save layout.

/// Display-name prefix identifying the game in an uninstall list.
///
/// Matching is a case-sensitive prefix test, so editions such as
/// "Cube World Alpha" also match.
pub const PRODUCT_PREFIX: &str = "Cube World";

/// Name of the install directory under a well-known parent folder.
pub const INSTALL_DIR_NAME: &str = "Cube World";

/// Save directory segment appended to an install location.
pub const SAVE_DIR_NAME: &str = "Save";

/// File name of the character database inside the save directory.
pub const DATABASE_FILE: &str = "characters.db";

/// Blob key holding the authoritative character count.
pub const COUNT_KEY: &str = "num";

/// Width of the NUL-padded name field in a character record.
pub const NAME_FIELD_LEN: usize = 16;
