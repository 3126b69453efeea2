//! Startup configuration and session restore.
//!
//! Restore implements the startup half of the session lifecycle: read
//! the persisted token + user, validate both, and either resume the
//! authenticated app (which immediately issues the content load) or
//! clear the leftovers and land on the login screen.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::adapters::{FileSessionStore, ReqwestHttpClient};
use crate::api::{ApiClient, DEFAULT_BASE_URL};
use crate::app::App;
use crate::session::Session;
use crate::traits::{HttpClient, SessionStore};

/// Configuration for the startup process.
///
/// # Example
///
/// ```ignore
/// use pluma::startup::StartupConfig;
///
/// let config = StartupConfig::from_env().with_base_url("http://localhost:9000");
/// ```
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Base URL of the Pluma API.
    pub base_url: String,
    /// Override for the session file location (tests, portable setups).
    pub session_path: Option<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_path: None,
        }
    }
}

impl StartupConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the session file path.
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Create a config from the environment. `PLUMA_API_URL` overrides
    /// the default base endpoint.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("PLUMA_API_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}

/// Restore the app from injected adapters.
///
/// A well-formed persisted session yields an authenticated app with the
/// bearer header installed and the initial content load in flight. Any
/// malformed record (missing pieces, the literal `"undefined"`/`"null"`
/// artifacts) clears the persisted state and yields the login screen.
pub async fn restore_with(api: Arc<ApiClient>, store: Arc<dyn SessionStore>) -> App {
    match store.load().await {
        Ok(Some(persisted)) => match Session::from_persisted(&persisted) {
            Some(session) => {
                info!(user_id = session.user.id, "restored persisted session");
                App::with_session(api, store, session)
            }
            None => {
                warn!("persisted session malformed; clearing it");
                if let Err(e) = store.clear().await {
                    warn!(error = %e, "failed to clear malformed session");
                }
                App::new(api, store)
            }
        },
        Ok(None) => App::new(api, store),
        Err(e) => {
            warn!(error = %e, "session store unreadable; starting unauthenticated");
            App::new(api, store)
        }
    }
}

/// Restore the app with the production adapters.
pub async fn restore(config: StartupConfig) -> color_eyre::Result<App> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let api = Arc::new(ApiClient::new(config.base_url.clone(), http));
    let store: Arc<dyn SessionStore> = match config.session_path {
        Some(path) => Arc::new(FileSessionStore::with_path(path)),
        None => Arc::new(FileSessionStore::new()?),
    };
    Ok(restore_with(api, store).await)
}

/// Install the file-backed tracing subscriber (`~/.pluma/pluma.log`).
///
/// Writing to a file keeps diagnostics off the alternate screen. Level
/// comes from `RUST_LOG`, defaulting to `info`. Safe to call twice;
/// the second call is a no-op.
pub fn init_tracing() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let dir = home.join(".pluma");
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::options()
        .create(true)
        .append(true)
        .open(dir.join("pluma.log"))
    else {
        return;
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemorySessionStore, MockHttpClient};
    use crate::app::Screen;
    use crate::session::PersistedSession;

    fn api() -> Arc<ApiClient> {
        let http = Arc::new(MockHttpClient::new());
        Arc::new(ApiClient::new("http://x", http as Arc<dyn HttpClient>))
    }

    fn valid_record() -> PersistedSession {
        PersistedSession {
            token: Some("t1".to_string()),
            user: Some(serde_json::json!({"id":1,"nome":"A","email":"a@b.com"})),
        }
    }

    #[test]
    fn test_config_default_and_builder() {
        let config = StartupConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.session_path.is_none());

        let config = StartupConfig::new()
            .with_base_url("http://api.local")
            .with_session_path("/tmp/s.json");
        assert_eq!(config.base_url, "http://api.local");
        assert_eq!(config.session_path, Some(PathBuf::from("/tmp/s.json")));
    }

    #[tokio::test]
    async fn test_restore_valid_session_authenticates_and_loads() {
        let store = Arc::new(InMemorySessionStore::with_session(valid_record()));
        let api = api();

        let app = restore_with(api.clone(), store).await;

        assert_eq!(app.screen, Screen::Feed);
        assert_eq!(app.current_user().map(|u| u.id), Some(1));
        assert_eq!(api.token().as_deref(), Some("t1"));
        assert!(app.loading);
    }

    #[tokio::test]
    async fn test_restore_missing_session_shows_login() {
        let store = Arc::new(InMemorySessionStore::new());
        let app = restore_with(api(), store).await;
        assert_eq!(app.screen, Screen::Login);
        assert!(app.session.is_none());
    }

    #[tokio::test]
    async fn test_restore_undefined_literal_clears_store() {
        let store = Arc::new(InMemorySessionStore::with_session(PersistedSession {
            token: Some("undefined".to_string()),
            user: Some(serde_json::Value::String("null".to_string())),
        }));

        let app = restore_with(api(), store.clone()).await;

        assert_eq!(app.screen, Screen::Login);
        assert!(app.session.is_none());
        // The malformed record must not survive
        assert_eq!(store.stored(), None);
    }

    #[tokio::test]
    async fn test_restore_partial_record_clears_store() {
        let store = Arc::new(InMemorySessionStore::with_session(PersistedSession {
            token: Some("t1".to_string()),
            user: None,
        }));

        let app = restore_with(api(), store.clone()).await;

        assert_eq!(app.screen, Screen::Login);
        assert_eq!(store.stored(), None);
    }

    #[tokio::test]
    async fn test_restore_store_failure_starts_unauthenticated() {
        let store = Arc::new(InMemorySessionStore::with_session(valid_record()));
        store.fail_load(true);

        let app = restore_with(api(), store).await;

        assert_eq!(app.screen, Screen::Login);
    }
}
