use super::model::{Session, SessionState};
use super::store::TokenStore;
use crate::api::{AccountApi, ApiError, ApiResult, BearerToken};
use crate::error::{Result, ZerothError};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Owns the signed-in session for the whole process.
///
/// `SessionManager` is responsible for:
/// - Exchanging credentials for a token and persisting it
/// - Re-validating a persisted token once at startup
/// - Dropping the session on sign-out or on a 401 from any authenticated call
/// - Publishing every change to subscribers
///
/// It is shared by `Arc`; it never mutates shared HTTP client state. Callers
/// obtain the token from [`SessionManager::current`] or
/// [`SessionManager::authorized`] and pass it with each request.
pub struct SessionManager {
    api: Arc<dyn AccountApi>,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Creates a signed-out manager. Call [`Self::restore_session`] once
    /// after construction to pick up a persisted token.
    pub fn new(api: Arc<dyn AccountApi>, store: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { api, store, state }
    }

    /// Signs in with e-mail and password.
    ///
    /// On success the token is persisted before the session is published, so
    /// a visible session always has a stored token behind it. On failure the
    /// previous session, if any, is left untouched.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let grant = self.api.login(email, password).await.map_err(|err| {
            tracing::warn!("[Session] Login failed: {}", err);
            ZerothError::from(err)
        })?;

        self.store.save(&grant.token)?;

        let session = Session {
            email: email.to_string(),
            screen_name: grant.screen_name,
            token: grant.token,
        };
        self.state.send_replace(SessionState::signed_in(&session));
        tracing::info!("[Session] Signed in as '{}'", session.screen_name);

        Ok(session)
    }

    /// Drops the session locally. No request is sent to the server.
    pub fn sign_out(&self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!("[Session] Failed to clear persisted token: {}", err);
        }
        self.state.send_replace(SessionState::default());
        tracing::info!("[Session] Signed out");
    }

    /// Re-validates a persisted token. Run once at startup.
    ///
    /// - No stored token: stays signed out.
    /// - `/users/me` succeeds: the session is populated.
    /// - `/users/me` answers 401: same cleanup as [`Self::sign_out`].
    /// - Any other failure: the token stays attached but no identity is set.
    pub async fn restore_session(&self) -> Option<Session> {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("[Session] No persisted token");
                return None;
            }
            Err(err) => {
                tracing::warn!("[Session] Failed to read persisted token: {}", err);
                return None;
            }
        };

        self.state.send_replace(SessionState {
            credential: Some(token.clone()),
            user: None,
        });

        match self.api.me(&token).await {
            Ok(user) => {
                tracing::info!("[Session] Restored session for '{}'", user.screen_name);
                self.state.send_modify(|state| state.user = Some(user));
                self.current()
            }
            Err(err) if err.is_unauthorized() => {
                tracing::info!("[Session] Persisted token rejected, signing out");
                self.sign_out();
                None
            }
            Err(err) => {
                tracing::warn!("[Session] Could not refresh identity: {}", err);
                None
            }
        }
    }

    /// The signed-in session, if any.
    pub fn current(&self) -> Option<Session> {
        self.state.borrow().session()
    }

    /// The attached token, even when no identity could be loaded.
    pub fn credential(&self) -> Option<BearerToken> {
        self.state.borrow().credential.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().is_signed_in()
    }

    /// Receiver that observes every session change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Signs out if `err` is a 401 for the token still attached. Returns
    /// whether it did.
    ///
    /// A rejection of a token that a later `sign_in` already replaced
    /// leaves the newer session alone.
    pub fn handle_unauthorized(&self, err: &ApiError, rejected: &BearerToken) -> bool {
        let attached = self.state.borrow().credential.as_ref() == Some(rejected);
        if err.is_unauthorized() && attached {
            tracing::info!("[Session] Credential rejected by server, signing out");
            self.sign_out();
            return true;
        }
        false
    }

    /// Runs an authenticated call with the current token.
    ///
    /// Fails with [`ZerothError::NotSignedIn`] without calling `call` when
    /// nobody is signed in, and signs out when `call` reports a 401.
    pub async fn authorized<T, F, Fut>(&self, call: F) -> Result<T>
    where
        F: FnOnce(BearerToken) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let session = self.current().ok_or(ZerothError::NotSignedIn)?;
        let token = session.token;
        call(token.clone()).await.map_err(|err| {
            self.handle_unauthorized(&err, &token);
            ZerothError::from(err)
        })
    }
}
