use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use xgo_persist::SyncMode;
use xgo_store::MAX_NAME_LEN;
use xgo_types::OwnerKey;

use crate::error::ConfigError;

/// Plugin configuration, read from `config.toml` in the server's plugin
/// directory. Every field has a default, so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct XGoConfig {
    /// Directory holding `publicLocations.bin` and `privateLocations.bin`.
    pub data_dir: PathBuf,
    /// Which player attribute keys the private registries.
    pub owner_key: OwnerKey,
    /// Maximum width of a `go-list` output line.
    pub list_line_width: usize,
    /// fsync data files before the atomic rename.
    pub fsync: bool,
}

impl Default for XGoConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("plugins/XGo"),
            owner_key: OwnerKey::Name,
            list_line_width: 60,
            fsync: true,
        }
    }
}

impl XGoConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn sync_mode(&self) -> SyncMode {
        if self.fsync {
            SyncMode::Full
        } else {
            SyncMode::OsDefault
        }
    }

    /// A list line must fit the longest legal name.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.list_line_width < MAX_NAME_LEN {
            return Err(ConfigError::Invalid(format!(
                "list_line_width must be at least {MAX_NAME_LEN}, got {}",
                self.list_line_width
            )));
        }
        Ok(())
    }
}
