use thiserror::Error;

/// Tagged failure returned by every remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, TLS, body read).
    #[error("Network error: {0}")]
    Transport(String),

    /// HTTP 401: the credential is missing, invalid or expired.
    #[error("Authentication failed: {}", .detail.as_deref().unwrap_or("unauthorized"))]
    Unauthorized { detail: Option<String> },

    /// The server rejected the request with a structured message.
    #[error("Request rejected ({status}): {message}")]
    Validation { status: u16, message: String },

    /// Anything else: unexpected status or an unreadable response body.
    #[error("Unexpected API response (status: {status:?})")]
    Unexpected {
        status: Option<u16>,
        detail: Option<String>,
    },
}

/// Discriminant of [`ApiError`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Transport,
    Unauthorized,
    Validation,
    Unexpected,
}

/// A type alias for `Result<T, ApiError>`.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn unauthorized(detail: Option<String>) -> Self {
        Self::Unauthorized { detail }
    }

    pub fn validation(status: u16, message: impl Into<String>) -> Self {
        Self::Validation {
            status,
            message: message.into(),
        }
    }

    pub fn unexpected(status: Option<u16>, detail: Option<String>) -> Self {
        Self::Unexpected { status, detail }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Transport(_) => ApiErrorKind::Transport,
            Self::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            Self::Validation { .. } => ApiErrorKind::Validation,
            Self::Unexpected { .. } => ApiErrorKind::Unexpected,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ApiErrorKind::Unauthorized
    }

    /// Server-provided text, if the response carried one.
    ///
    /// Transport failures never have a detail: their text comes from the
    /// local HTTP stack and is not meant for end users.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Transport(_) => None,
            Self::Unauthorized { detail } | Self::Unexpected { detail, .. } => detail.as_deref(),
            Self::Validation { message, .. } => Some(message),
        }
    }

    /// `"{action} failed: {detail}"`, or a generic retry hint without detail.
    pub fn user_message(&self, action: &str) -> String {
        match self.detail() {
            Some(detail) => format!("{action} failed: {detail}"),
            None => format!("{action} failed. Please try again."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(ApiError::transport("dns").kind(), ApiErrorKind::Transport);
        assert_eq!(ApiError::unauthorized(None).kind(), ApiErrorKind::Unauthorized);
        assert_eq!(ApiError::validation(400, "bad").kind(), ApiErrorKind::Validation);
        assert_eq!(ApiError::unexpected(Some(500), None).kind(), ApiErrorKind::Unexpected);
    }

    #[test]
    fn test_transport_detail_is_hidden() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.detail(), None);
        assert_eq!(err.user_message("Login"), "Login failed. Please try again.");
    }

    #[test]
    fn test_unauthorized_with_detail() {
        let err = ApiError::unauthorized(Some("Incorrect email or password".into()));
        assert_eq!(
            err.user_message("Login"),
            "Login failed: Incorrect email or password"
        );
        assert_eq!(
            err.to_string(),
            "Authentication failed: Incorrect email or password"
        );
    }
}
