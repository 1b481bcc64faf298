//! Configuration loading and service wiring.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use notifia_application::{ArticleService, HistoryCache, SessionManager, ThemeService};
use notifia_core::NotifiaError;
use notifia_core::config::ClientConfig;
use notifia_core::session::{NavigationDecision, Route};
use notifia_core::storage::{KeyValueStore, keys};
use notifia_infrastructure::{
    ConfigService, FileKeyValueStore, MemoryKeyValueStore, ReqwestTransport,
};

/// Command-line values that take precedence over `config.toml`.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub base_url: Option<String>,
    pub storage_dir: Option<PathBuf>,
}

/// The effective configuration and where it came from.
pub struct Settings {
    pub config: ClientConfig,
    pub service: ConfigService,
    /// Why the default config file was ignored, reported once logging is up.
    pub load_error: Option<NotifiaError>,
}

impl Settings {
    /// Loads the config file and applies `overrides`.
    ///
    /// A broken file at the default location falls back to defaults; a
    /// broken file passed with `--config` is an error.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let (service, explicit) = match &overrides.config {
            Some(path) => (ConfigService::new(path.clone()), true),
            None => (ConfigService::default_location()?, false),
        };

        let (mut config, load_error) = match service.load() {
            Ok(config) => (config, None),
            Err(e) if !explicit => (ClientConfig::default(), Some(e)),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to load {}", service.path().display()));
            }
        };

        if let Some(base_url) = &overrides.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(dir) = &overrides.storage_dir {
            config.storage.dir = Some(dir.clone());
        }

        Ok(Self {
            config,
            service,
            load_error,
        })
    }
}

/// Services shared by every command that talks to the API.
pub struct AppContext {
    pub config: ClientConfig,
    pub session: SessionManager,
    pub articles: ArticleService,
    pub history: HistoryCache,
    pub theme: ThemeService,
    store: Arc<dyn KeyValueStore>,
    transport: Arc<ReqwestTransport>,
}

impl AppContext {
    /// Wires the services and restores the saved session.
    pub async fn build(config: ClientConfig, ephemeral: bool) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = if ephemeral {
            Arc::new(MemoryKeyValueStore::new())
        } else {
            let store = match &config.storage.dir {
                Some(dir) => FileKeyValueStore::new(dir.clone()),
                None => FileKeyValueStore::default_location()?,
            };
            tracing::debug!("[Cli] Storage directory: {}", store.dir().display());
            Arc::new(store)
        };
        Self::with_store(config, store).await
    }

    /// Wires the services over an existing store.
    pub async fn with_store(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.api)?);
        match store.get(keys::SESSION_COOKIES).await {
            Ok(Some(cookies)) => transport.restore_cookies(&cookies),
            Ok(None) => {}
            Err(e) => tracing::warn!("[Cli] Failed to read saved cookies: {}", e),
        }

        let session = SessionManager::start(store.clone(), transport.clone()).await;
        let articles = ArticleService::new(transport.clone());
        let history = HistoryCache::new(store.clone());
        let theme = ThemeService::new(store.clone());
        theme.load().await;

        Ok(Self {
            config,
            session,
            articles,
            history,
            theme,
            store,
            transport,
        })
    }

    /// Saves the API session cookie for the next run, or forgets it once
    /// signed out.
    pub async fn save_cookies(&self) {
        let result = match (self.session.is_authenticated(), self.transport.cookie_header()) {
            (true, Some(cookies)) => self.store.set(keys::SESSION_COOKIES, &cookies).await,
            _ => self.store.remove(keys::SESSION_COOKIES).await,
        };
        if let Err(e) = result {
            tracing::warn!("[Cli] Failed to save session cookies: {}", e);
        }
    }

    /// Fails with a readable message unless the session may open `route`.
    pub fn require(&self, route: Route) -> Result<()> {
        match self.session.navigate(&route) {
            NavigationDecision::Render => Ok(()),
            NavigationDecision::Redirect(Route::Login) => bail!(
                "Sign in first: {} needs an account (run `notifia login <email> <password>`)",
                route
            ),
            NavigationDecision::Redirect(target) => {
                bail!("{} is not available in this session (go to {})", route, target)
            }
            NavigationDecision::Wait => bail!("The session is still loading"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_win_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://file.example.com/api\"\n").unwrap();

        let settings = Settings::load(&Overrides {
            config: Some(path),
            base_url: Some("http://127.0.0.1:4000/api".to_string()),
            storage_dir: Some(temp_dir.path().join("storage")),
        })
        .unwrap();

        assert_eq!(settings.config.api.base_url, "http://127.0.0.1:4000/api");
        assert_eq!(
            settings.config.storage.dir,
            Some(temp_dir.path().join("storage"))
        );
        assert!(settings.load_error.is_none());
    }

    #[test]
    fn test_broken_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[feed\n").unwrap();

        let result = Settings::load(&Overrides {
            config: Some(path),
            ..Overrides::default()
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_guarded_routes_need_a_session() {
        let context = AppContext::build(ClientConfig::default(), true).await.unwrap();

        let err = context.require(Route::Bookmarks).unwrap_err();
        assert!(err.to_string().starts_with("Sign in first"));
        assert!(context.require(Route::History).is_ok());
    }
}
