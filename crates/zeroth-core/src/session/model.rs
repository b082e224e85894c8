use crate::api::BearerToken;
use serde::{Deserialize, Serialize};

/// Identity returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub email: String,
    pub screen_name: String,
}

/// Successful response of the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: BearerToken,
    pub screen_name: String,
}

/// A signed-in user together with the credential that proves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub screen_name: String,
    pub token: BearerToken,
}

/// Everything subscribers can observe about the session.
///
/// `credential` may be set while `user` is not: that is a restored token
/// whose identity refresh failed for a reason other than 401. Consumers treat
/// that state as signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub credential: Option<BearerToken>,
    pub user: Option<UserIdentity>,
}

impl SessionState {
    pub(crate) fn signed_in(session: &Session) -> Self {
        Self {
            credential: Some(session.token.clone()),
            user: Some(UserIdentity {
                email: session.email.clone(),
                screen_name: session.screen_name.clone(),
            }),
        }
    }

    /// The signed-in session, if both identity and credential are present.
    pub fn session(&self) -> Option<Session> {
        match (&self.user, &self.credential) {
            (Some(user), Some(token)) => Some(Session {
                email: user.email.clone(),
                screen_name: user.screen_name.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some() && self.credential.is_some()
    }
}
