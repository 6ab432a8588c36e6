//! Server configuration: what to crawl and where to listen, loaded from a
//! JSON file on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Persisted server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub roots: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
    pub bind_addr: String,
    pub max_file_bytes: u64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            roots: vec![PathBuf::from(".")],
            extensions: None,
            bind_addr: "localhost:8080".into(),
            max_file_bytes: 64 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Loads a config from `path`. A missing file is not an error: it is
    /// created with [`Config::default`] and immediately written back, just
    /// as `LoadConfig` does for a user's first run.
    pub fn load(path: &Path) -> Result<Config> {
        match fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| Error::Config(format!("parsing {}: {}", path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Config::default();
                config.save(path)?;
                Ok(config)
            }
            Err(e) => Err(Error::Config(format!("reading {}: {}", path.display(), e))),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| Error::Config(format!("creating {}: {}", dir.display(), e)))?;
        }
        let bytes = serde_json::to_vec_pretty(self)
            .map_err(|e| Error::Config(format!("serializing config: {}", e)))?;
        fs::write(path, bytes).map_err(|e| Error::Config(format!("writing {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_default_and_is_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            roots: vec![PathBuf::from("/a"), PathBuf::from("/b")],
            extensions: Some(vec!["rs".into(), "toml".into()]),
            bind_addr: "0.0.0.0:9090".into(),
            max_file_bytes: 1024,
        };
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"not json").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
