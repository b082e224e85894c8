//! Subcommand implementations.

pub mod account;
pub mod config;
pub mod consult;
pub mod pets;

use crate::app::AppContext;
use anyhow::{Result, anyhow, bail};
use zeroth_core::error::ZerothError;
use zeroth_core::session::Session;

/// Turns a domain failure into the message printed for `action`.
pub(crate) fn failed(action: &str, err: ZerothError) -> anyhow::Error {
    if err == ZerothError::NotSignedIn {
        return anyhow!("Not logged in. Run `zeroth login` first.");
    }
    if err.is_unauthorized() {
        return anyhow!(
            "{}\nYour session has ended. Run `zeroth login` again.",
            err.user_message(action)
        );
    }
    anyhow!(err.user_message(action))
}

/// Re-validates the saved token; commands that act for the user start here.
pub(crate) async fn require_session(ctx: &AppContext) -> Result<Session> {
    match ctx.session.restore_session().await {
        Some(session) => Ok(session),
        None => bail!("Not logged in. Run `zeroth login` first."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeroth_core::api::ApiError;

    #[test]
    fn test_failed_adds_login_hint_for_401() {
        let err = failed(
            "Delete",
            ZerothError::Api(ApiError::unauthorized(Some("Token expired".into()))),
        );
        assert_eq!(
            err.to_string(),
            "Delete failed: Token expired\nYour session has ended. Run `zeroth login` again."
        );
    }

    #[test]
    fn test_failed_prefers_server_text() {
        let err = failed("Delete", ZerothError::Api(ApiError::validation(404, "Pet not found")));
        assert_eq!(err.to_string(), "Delete failed: Pet not found");
    }
}
