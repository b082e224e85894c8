//! Token persistence seam.

use crate::api::BearerToken;
use crate::error::Result;
use std::sync::Mutex;

/// Persists the single bearer token across runs.
///
/// Implementations should keep the token out of logs and error messages.
pub trait TokenStore: Send + Sync {
    /// Returns the persisted token, or `None` if nothing is stored.
    fn load(&self) -> Result<Option<BearerToken>>;

    /// Replaces the persisted token.
    fn save(&self, token: &BearerToken) -> Result<()>;

    /// Removes the persisted token. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}

/// Process-local store, for tests and for runs that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<BearerToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<BearerToken>> {
        Ok(self.lock().clone())
    }

    fn save(&self, token: &BearerToken) -> Result<()> {
        *self.lock() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock() = None;
        Ok(())
    }
}

impl MemoryTokenStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<BearerToken>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
