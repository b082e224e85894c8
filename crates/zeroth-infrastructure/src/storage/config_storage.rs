//! `config.toml` storage.

use super::atomic_toml::AtomicTomlFile;
use std::path::PathBuf;
use zeroth_core::config::AppConfig;
use zeroth_core::error::Result;

/// Loads and updates the client configuration file.
///
/// A missing file is not an error: it reads as [`AppConfig::default`].
pub struct ConfigStorage {
    file: AtomicTomlFile<AppConfig>,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config = self.file.load()?.unwrap_or_default();
        tracing::debug!("[Config] Loaded {}", self.file.path().display());
        Ok(config)
    }

    /// Sets or clears the API base URL, keeping every other key.
    pub fn set_api_base_url(&self, url: Option<String>) -> Result<AppConfig> {
        let url = url.map(|u| u.trim().trim_end_matches('/').to_string());
        self.file.update(AppConfig::default(), |config| {
            config.api_base_url = url;
            Ok(())
        })
    }
}
