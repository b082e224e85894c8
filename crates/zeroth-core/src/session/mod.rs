//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: signed-in identity and the observable [`SessionState`]
//! - `store`: persistence seam for the bearer token ([`TokenStore`])
//! - `manager`: sign-in, sign-out and startup restore ([`SessionManager`])

mod manager;
mod model;
mod store;


pub use manager::SessionManager;
pub use model::{LoginGrant, Session, SessionState, UserIdentity};
pub use store::{MemoryTokenStore, TokenStore};
