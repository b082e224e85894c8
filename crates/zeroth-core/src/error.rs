//! Error types for the 0thOpinion client.

use crate::api::ApiError;
use thiserror::Error;

/// Shared error type for operations that combine local state and remote calls.
///
/// Remote failures keep their tag inside [`ZerothError::Api`], so callers can
/// still branch on the [`ApiError`] kind after it crossed a service boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZerothError {
    /// An authenticated action was attempted without a signed-in session.
    #[error("Not signed in")]
    NotSignedIn,

    /// Local input validation failed before any request was sent.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The remote API returned a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZerothError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns true when the failure came from a rejected credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_unauthorized())
    }

    /// Message suitable for showing to the user.
    ///
    /// Prefers the server-provided text when present and falls back to a
    /// generic sentence built from `action` otherwise.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::Api(err) => err.user_message(action),
            Self::NotSignedIn => "Please log in first.".to_string(),
            Self::Validation(message) => message.clone(),
            other => format!("{action} failed: {other}"),
        }
    }
}

impl From<std::io::Error> for ZerothError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ZerothError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ZerothError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ZerothError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ZerothError>`.
pub type Result<T> = std::result::Result<T, ZerothError>;
