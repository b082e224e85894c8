//! Account registration.

mod model;
mod service;

pub use model::{AccountSex, PREFECTURES, Registration};
pub use service::AccountService;
