use crate::constants::{BASE_URL_ENV, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Client configuration.
///
/// Resolution order: `GRADEBOOK_BASE_URL` env var, then
/// `~/.gradebook/config.yaml`, then the built-in default. A missing or
/// unparseable config file falls back silently to defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut config = Self::from_file(&Self::config_path()).unwrap_or_default();

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        // Path joins assume no trailing slash
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config
    }

    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gradebook")
            .join("config.yaml")
    }

    fn from_file(path: &Path) -> Option<Config> {
        let content = fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&content).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("config.yaml"));
        assert!(config.is_none());
        assert_eq!(Config::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_reads_base_url_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "base_url: http://records.example.com:9090\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.base_url, "http://records.example.com:9090");
    }

    #[test]
    fn test_invalid_yaml_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, ": not yaml {{{").unwrap();

        assert!(Config::from_file(&path).is_none());
    }
}
