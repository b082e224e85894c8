//! Composition root and shared state for one `zeroth` invocation.

mod bootstrap;

pub use bootstrap::{BaseUrlSource, GlobalOptions, bootstrap};

use std::sync::Arc;
use zeroth_core::account::AccountService;
use zeroth_core::config::AppConfig;
use zeroth_core::consultation::ConsultationService;
use zeroth_core::interview::Catalog;
use zeroth_core::pet::PetService;
use zeroth_core::session::SessionManager;
use zeroth_infrastructure::{ConfigStorage, ZerothPaths};

/// Everything a command needs, wired once at startup.
pub struct AppContext {
    pub paths: ZerothPaths,
    pub config_storage: ConfigStorage,
    pub config: AppConfig,
    pub base_url: String,
    pub base_url_source: BaseUrlSource,
    pub session: Arc<SessionManager>,
    pub accounts: AccountService,
    pub pets: PetService,
    pub consultation: ConsultationService,
    pub catalog: Arc<Catalog>,
}
