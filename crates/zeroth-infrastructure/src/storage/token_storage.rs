//! Bearer token persistence in `token.json`.

use super::atomic_toml::write_atomic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use zeroth_core::api::BearerToken;
use zeroth_core::error::Result;
use zeroth_core::session::TokenStore;

#[derive(Serialize, Deserialize)]
struct TokenFile {
    access_token: BearerToken,
}

/// [`TokenStore`] backed by a JSON file readable only by the owner.
///
/// # Security Note
///
/// The token is stored in plaintext. The file is written with mode 600 on
/// Unix; its content never appears in logs or error messages.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<BearerToken>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }

        let file: TokenFile = serde_json::from_str(&content)?;
        if file.access_token.as_str().is_empty() {
            return Ok(None);
        }
        Ok(Some(file.access_token))
    }

    fn save(&self, token: &BearerToken) -> Result<()> {
        let json = serde_json::to_string_pretty(&TokenFile {
            access_token: token.clone(),
        })?;
        write_atomic(&self.path, json.as_bytes(), true)?;
        tracing::debug!("[Token] Saved token to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("[Token] Removed {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zeroth_core::error::ZerothError;

    fn store(dir: &TempDir) -> FileTokenStore {
        FileTokenStore::new(dir.path().join("token.json"))
    }

    #[test]
    fn test_load_nonexistent_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store(&dir).load().unwrap(), None);
    }

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save(&BearerToken::new("abc.def")).unwrap();
        assert_eq!(store.load().unwrap(), Some(BearerToken::new("abc.def")));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());

        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "{ invalid json").unwrap();

        assert!(matches!(
            store.load(),
            Err(ZerothError::Serialization { .. })
        ));
    }

    #[test]
    fn test_empty_token_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), r#"{"access_token": ""}"#).unwrap();

        assert_eq!(store.load().unwrap(), None);
    }
}
