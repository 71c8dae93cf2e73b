use std::fs;
use std::path::Path;

use cwsave_locate::SearchTerms;
use cwsave_types::{DATABASE_FILE, INSTALL_DIR_NAME, PRODUCT_PREFIX, SAVE_DIR_NAME};
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Names used to find and open the character database.
///
/// Every field is optional in a config file and falls back to the built-in
/// Cube World layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CwsaveConfig {
    pub product_prefix: String,
    pub install_dir_name: String,
    pub save_dir_name: String,
    pub database_file: String,
}

impl Default for CwsaveConfig {
    fn default() -> Self {
        Self {
            product_prefix: PRODUCT_PREFIX.to_string(),
            install_dir_name: INSTALL_DIR_NAME.to_string(),
            save_dir_name: SAVE_DIR_NAME.to_string(),
            database_file: DATABASE_FILE.to_string(),
        }
    }
}

impl CwsaveConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> SdkResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SdkError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// An empty prefix would match every installed product.
    fn validate(&self) -> SdkResult<()> {
        let fields = [
            ("product_prefix", &self.product_prefix),
            ("install_dir_name", &self.install_dir_name),
            ("save_dir_name", &self.save_dir_name),
            ("database_file", &self.database_file),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(SdkError::EmptyConfigField { field: *field }),
            None => Ok(()),
        }
    }

    pub fn search_terms(&self) -> SearchTerms {
        SearchTerms {
            product_prefix: self.product_prefix.clone(),
            install_dir_name: self.install_dir_name.clone(),
            save_dir_name: self.save_dir_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = CwsaveConfig::default();
        assert_eq!(c.product_prefix, "Cube World");
        assert_eq!(c.install_dir_name, "Cube World");
        assert_eq!(c.save_dir_name, "Save");
        assert_eq!(c.database_file, "characters.db");
        assert_eq!(c.search_terms(), SearchTerms::default());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = CwsaveConfig::from_toml_str("database_file = \"backup.db\"\n").unwrap();
        assert_eq!(c.database_file, "backup.db");
        assert_eq!(c.save_dir_name, "Save");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(CwsaveConfig::from_toml_str("").unwrap(), CwsaveConfig::default());
    }

    #[test]
    fn empty_field_is_rejected() {
        let err = CwsaveConfig::from_toml_str("product_prefix = \"\"").unwrap_err();
        assert!(matches!(
            err,
            SdkError::EmptyConfigField { field: "product_prefix" }
        ));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = CwsaveConfig::from_toml_str("save_dir_name = [").unwrap_err();
        assert!(matches!(err, SdkError::ConfigParse(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cwsave.toml");
        fs::write(&path, "install_dir_name = \"CubeWorld\"\nsave_dir_name = \"Saves\"\n").unwrap();

        let c = CwsaveConfig::from_toml_file(&path).unwrap();
        let terms = c.search_terms();
        assert_eq!(terms.install_dir_name, "CubeWorld");
        assert_eq!(terms.save_dir_name, "Saves");
        assert_eq!(terms.product_prefix, "Cube World");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = CwsaveConfig::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, SdkError::ConfigRead { path: ref p, .. } if p == &path));
    }
}
