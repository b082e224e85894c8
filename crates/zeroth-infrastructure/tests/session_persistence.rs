//! Session lifecycle against the real token file.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;
use zeroth_core::account::Registration;
use zeroth_core::api::{AccountApi, ApiError, ApiResult, BearerToken};
use zeroth_core::session::{LoginGrant, SessionManager, TokenStore, UserIdentity};
use zeroth_infrastructure::{FileTokenStore, ZerothPaths};

/// Accepts one password and one token; the token can be revoked.
struct FakeAccountApi {
    revoked: AtomicBool,
}

impl FakeAccountApi {
    fn new() -> Self {
        Self {
            revoked: AtomicBool::new(false),
        }
    }
}

#[async_trait::async_trait]
impl AccountApi for FakeAccountApi {
    async fn register(&self, _registration: &Registration) -> ApiResult<()> {
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginGrant> {
        if password != "correct horse" {
            return Err(ApiError::unauthorized(Some(
                "Incorrect email or password".into(),
            )));
        }
        Ok(LoginGrant {
            token: BearerToken::new(format!("token-for-{email}")),
            screen_name: "hanako".into(),
        })
    }

    async fn me(&self, token: &BearerToken) -> ApiResult<UserIdentity> {
        if self.revoked.load(Ordering::SeqCst) || token.as_str() != "token-for-hanako@example.com" {
            return Err(ApiError::unauthorized(None));
        }
        Ok(UserIdentity {
            email: "hanako@example.com".into(),
            screen_name: "hanako".into(),
        })
    }
}

fn manager(paths: &ZerothPaths, api: Arc<FakeAccountApi>) -> SessionManager {
    SessionManager::new(api, Arc::new(FileTokenStore::new(paths.token_file())))
}

#[tokio::test]
async fn session_survives_restart_and_sign_out_removes_token() {
    let dir = TempDir::new().unwrap();
    let paths = ZerothPaths::new(Some(dir.path())).unwrap();
    let api = Arc::new(FakeAccountApi::new());

    let first = manager(&paths, api.clone());
    first
        .sign_in("hanako@example.com", "correct horse")
        .await
        .unwrap();
    assert!(paths.token_file().exists());

    let second = manager(&paths, api.clone());
    let restored = second.restore_session().await.unwrap();
    assert_eq!(restored.email, "hanako@example.com");

    second.sign_out();
    assert!(!paths.token_file().exists());

    let third = manager(&paths, api);
    assert!(third.restore_session().await.is_none());
}

#[tokio::test]
async fn wrong_password_persists_nothing() {
    let dir = TempDir::new().unwrap();
    let paths = ZerothPaths::new(Some(dir.path())).unwrap();
    let manager = manager(&paths, Arc::new(FakeAccountApi::new()));

    let err = manager
        .sign_in("hanako@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(manager.current().is_none());
    assert!(!paths.token_file().exists());
}

#[tokio::test]
async fn revoked_token_is_removed_on_restore() {
    let dir = TempDir::new().unwrap();
    let paths = ZerothPaths::new(Some(dir.path())).unwrap();
    let api = Arc::new(FakeAccountApi::new());
    manager(&paths, api.clone())
        .sign_in("hanako@example.com", "correct horse")
        .await
        .unwrap();

    api.revoked.store(true, Ordering::SeqCst);
    let restarted = manager(&paths, api);

    assert!(restarted.restore_session().await.is_none());
    assert!(!paths.token_file().exists());
    let store = FileTokenStore::new(paths.token_file());
    assert_eq!(store.load().unwrap(), None);
}
