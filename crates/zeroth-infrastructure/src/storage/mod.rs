//! File-backed storage: atomic writes, the config file and the token file.

mod atomic_toml;
mod config_storage;
mod token_storage;

pub use atomic_toml::AtomicTomlFile;
pub use config_storage::ConfigStorage;
pub use token_storage::FileTokenStore;
