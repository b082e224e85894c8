//! Path management for 0thOpinion client files.

use std::path::{Path, PathBuf};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine the config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Locations of everything the client keeps on disk.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/zeroth/            # Config directory (platform specific)
/// ├── config.toml              # API base URL, interview override
/// ├── token.json               # Persisted bearer token (mode 600)
/// └── logs/                    # Daily rolling logs
///     └── zeroth.YYYY-MM-DD.log
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZerothPaths {
    config_dir: PathBuf,
}

impl ZerothPaths {
    const APP_DIR: &'static str = "zeroth";

    /// Uses `base` as the config directory, or the platform default
    /// (`dirs::config_dir()/zeroth`) when `None`.
    pub fn new(base: Option<&Path>) -> Result<Self, PathError> {
        let config_dir = match base {
            Some(base) => base.to_path_buf(),
            None => dirs::config_dir()
                .ok_or(PathError::ConfigDirNotFound)?
                .join(Self::APP_DIR),
        };
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn token_file(&self) -> PathBuf {
        self.config_dir.join("token.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }
}
