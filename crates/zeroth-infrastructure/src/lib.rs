//! Local persistence for the 0thOpinion client.
//!
//! - [`ZerothPaths`]: where config, token and logs live
//! - [`ConfigStorage`]: `config.toml`
//! - [`FileTokenStore`]: the bearer token, implementing
//!   [`zeroth_core::session::TokenStore`]

pub mod paths;
pub mod storage;

pub use crate::paths::ZerothPaths;
pub use crate::storage::{ConfigStorage, FileTokenStore};
