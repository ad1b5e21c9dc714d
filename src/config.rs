//! Store configuration
//!
//! The data directory is chosen by the caller. Inside it, an optional
//! `fleetdb.yaml` can override the remaining settings:
//!
//! ```yaml
//! backup_dir: backups        # relative to the data directory
//! data_version: TMS v1.0
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "fleetdb.yaml";
pub const DEFAULT_DATA_DIR: &str = "tms_data";
pub const DEFAULT_DATA_VERSION: &str = "TMS v1.0";

/// Settings read from `fleetdb.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where export backups are written
    pub backup_dir: PathBuf,
    /// Version tag stamped on exported documents
    pub data_version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backup_dir: PathBuf::from("backups"),
            data_version: DEFAULT_DATA_VERSION.to_string(),
        }
    }
}

/// Resolved configuration for one data directory
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl Config {
    /// Defaults for `data_dir`, without reading anything
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            settings: Settings::default(),
        }
    }

    /// Load `fleetdb.yaml` from `data_dir` if present
    pub async fn load(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::new(data_dir);
        let path = config.file_path();

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                config.settings = serde_yaml::from_str(&text)?;
                tracing::debug!(path = %path.display(), "Loaded config");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(Error::FileReadError { path, source }),
        }

        Ok(config)
    }

    /// Write the current settings unless a config file already exists
    pub async fn write_if_missing(&self) -> Result<bool> {
        let path = self.file_path();
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(false);
        }

        let yaml = serde_yaml::to_string(&self.settings)?;
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| Error::FileWriteError {
                path: self.data_dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, yaml)
            .await
            .map_err(|source| Error::FileWriteError { path, source })?;
        Ok(true)
    }

    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Backup directory, resolved against the data directory
    pub fn backup_dir(&self) -> PathBuf {
        resolve(&self.data_dir, &self.settings.backup_dir)
    }

    pub fn data_version(&self) -> &str {
        &self.settings.data_version
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
