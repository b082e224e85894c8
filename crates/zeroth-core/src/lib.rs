//! Domain layer of the 0thOpinion client.
//!
//! Holds the models shared by every front end, the trait seams the HTTP
//! client implements, and the two stateful pieces of the application: the
//! [`session::SessionManager`] and the [`interview::Interview`] walker.

pub mod account;
pub mod action;
pub mod api;
pub mod config;
pub mod consultation;
pub mod error;
pub mod interview;
pub mod pet;
pub mod session;

pub use api::{ApiError, ApiErrorKind, ApiResult, BearerToken};
pub use error::ZerothError;
