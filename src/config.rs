// Configuration file handling

use crate::filter::FilterMode;
use crate::storage::DEFAULT_KEY;
use eyre::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "tasklist";
const CONFIG_FILE: &str = "config.yaml";
const DB_FILE: &str = "tasklist.db";

/// User configuration, read from YAML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding the key-value store
    pub storage_path: PathBuf,
    /// Key the task list is stored under
    pub storage_key: String,
    /// Filter used by `list` when none is given
    pub default_filter: FilterMode,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            storage_path: data_dir.join(APP_DIR).join(DB_FILE),
            storage_key: DEFAULT_KEY.to_string(),
            default_filter: FilterMode::All,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/tasklist/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context(format!("Failed to read config file {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).context(format!("Failed to parse config file {}", path.display()))?;

        debug!(path = ?path, ?config, "Loaded config");
        Ok(config)
    }

    /// Load from an explicit path, or from the default location
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match Self::default_path() {
                Some(p) => Self::load(&p),
                None => Ok(Self::default()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("nope.yaml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.storage_key, "todo.tasks.v1");
        assert_eq!(config.default_filter, FilterMode::All);
        assert!(config.storage_path.ends_with("tasklist/tasklist.db"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "default_filter: active\nstorage_key: my.tasks\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_filter, FilterMode::Active);
        assert_eq!(config.storage_key, "my.tasks");
        assert_eq!(config.storage_path, Config::default().storage_path);
    }

    #[test]
    fn test_storage_path_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "storage_path: /tmp/elsewhere.db\n").unwrap();

        let config = Config::resolve(Some(&path)).unwrap();
        assert_eq!(config.storage_path, PathBuf::from("/tmp/elsewhere.db"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "default_filter: sideways\n").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
