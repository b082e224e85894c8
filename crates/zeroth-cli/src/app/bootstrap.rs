use super::AppContext;
use anyhow::{Context, Result};
use std::fmt;
use std::sync::Arc;
use zeroth_core::account::AccountService;
use zeroth_core::api::{AccountApi, PetApi, QuestionApi};
use zeroth_core::config::{AppConfig, DEFAULT_API_BASE_URL};
use zeroth_core::consultation::ConsultationService;
use zeroth_core::pet::PetService;
use zeroth_core::session::{SessionManager, TokenStore};
use zeroth_infrastructure::{ConfigStorage, FileTokenStore, ZerothPaths};
use zeroth_interaction::ApiClient;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// `--api-url` or `ZEROTH_API_BASE_URL`.
    pub api_url: Option<String>,
}

/// Where the effective API base URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrlSource {
    CommandLine,
    ConfigFile,
    Default,
}

impl fmt::Display for BaseUrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandLine => f.write_str("--api-url / ZEROTH_API_BASE_URL"),
            Self::ConfigFile => f.write_str("config file"),
            Self::Default => f.write_str("built-in default"),
        }
    }
}

/// Flag or environment, then `config.toml`, then the built-in default.
pub fn resolve_base_url(cli: Option<&str>, config: &AppConfig) -> (String, BaseUrlSource) {
    if let Some(url) = cli.map(str::trim).filter(|url| !url.is_empty()) {
        return (url.to_string(), BaseUrlSource::CommandLine);
    }
    match config.api_base_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => (url.to_string(), BaseUrlSource::ConfigFile),
        _ => (DEFAULT_API_BASE_URL.to_string(), BaseUrlSource::Default),
    }
}

/// Loads configuration and wires the services together.
///
/// Does not touch the network: restoring the saved session is left to the
/// commands that need it.
pub fn bootstrap(paths: ZerothPaths, options: &GlobalOptions) -> Result<AppContext> {
    let config_storage = ConfigStorage::new(paths.config_file());
    let config = config_storage
        .load()
        .with_context(|| format!("Failed to read {}", paths.config_file().display()))?;
    let catalog = Arc::new(
        config
            .catalog()
            .context("Invalid [interview] section in config.toml")?,
    );

    let (base_url, base_url_source) = resolve_base_url(options.api_url.as_deref(), &config);
    tracing::info!("[Bootstrap] API base URL {} ({})", base_url, base_url_source);

    let client = Arc::new(ApiClient::new(base_url.clone()));
    let account_api: Arc<dyn AccountApi> = client.clone();
    let pet_api: Arc<dyn PetApi> = client.clone();
    let question_api: Arc<dyn QuestionApi> = client;

    let token_store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(paths.token_file()));
    let session = Arc::new(SessionManager::new(account_api.clone(), token_store));

    Ok(AppContext {
        accounts: AccountService::new(account_api),
        pets: PetService::new(pet_api, session.clone()),
        consultation: ConsultationService::new(question_api, session.clone()),
        session,
        catalog,
        config,
        config_storage,
        base_url,
        base_url_source,
        paths,
    })
}
