//! The application context: every piece of shared client state, built once.
//!
//! Nothing in this crate lives in a global. The context owns the session
//! store, event bus, preferences and API client, and hands out `Arc`s to
//! whatever needs them.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::{ApiClient, ApiError, Notifier};
use crate::auth::{Session, SessionStore};
use crate::config::Config;
use crate::events::EventBus;
use crate::preferences::Preferences;
use crate::router::{NavigationGuard, Router};
use crate::storage::{FileStore, KeyValueStore, SecureStorage};

pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub bus: Arc<EventBus>,
    pub preferences: Arc<Preferences>,
    pub api: ApiClient,
}

impl AppContext {
    /// Build the context with state persisted under the config's data directory.
    pub fn init(config: Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let data_dir = config.data_dir()?;
        let backend = FileStore::new(data_dir.clone())
            .with_context(|| format!("Failed to open storage at {}", data_dir.display()))?;
        Self::with_backend(config, Arc::new(backend), notifier)
    }

    pub fn with_backend(
        config: Config,
        backend: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        config.validate()?;

        let storage = Arc::new(
            SecureStorage::new(backend, &config.encryption_secret)
                .context("Failed to initialise encrypted storage")?,
        );
        let bus = Arc::new(EventBus::new());
        let session = Arc::new(SessionStore::restore(Arc::clone(&storage)));
        let preferences = Arc::new(Preferences::restore(storage, Arc::clone(&bus)));
        let api = ApiClient::new(&config, Arc::clone(&session), Arc::clone(&bus), notifier)?;

        info!(base_url = %config.api_base_url, logged_in = session.is_login(), "Client context ready");
        Ok(Self {
            config,
            session,
            bus,
            preferences,
            api,
        })
    }

    /// Log in against the API and make the result the current session.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session> {
        let session = self.api.login(username, password).await?;
        self.session
            .login(session.clone())
            .context("Logged in, but the session could not be saved")?;
        Ok(session)
    }

    pub fn sign_out(&self) -> bool {
        self.session.logout()
    }

    pub fn router(&self) -> Router {
        Router::new(NavigationGuard::new(Arc::clone(&self.session)))
    }

    /// Convenience for callers that only care whether a call failed for auth.
    pub fn is_session_error(err: &anyhow::Error) -> bool {
        err.downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_session_expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TracingNotifier;
    use crate::storage::MemoryStore;

    fn config() -> Config {
        Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            encryption_secret: "ctx-secret".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = AppContext::with_backend(
            Config::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(TracingNotifier),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_session_shared_across_context() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let ctx = AppContext::with_backend(config(), Arc::clone(&backend), Arc::new(TracingNotifier)).unwrap();
        ctx.session.login(Session::new("admin", "abc123")).unwrap();
        assert!(ctx.api.session().is_login());

        // A second context over the same storage sees the session
        let again = AppContext::with_backend(config(), backend, Arc::new(TracingNotifier)).unwrap();
        assert_eq!(again.session.token(), "abc123");

        assert!(again.sign_out());
        assert!(!again.session.is_login());
    }

    #[test]
    fn test_is_session_error() {
        let err: anyhow::Error = ApiError::SessionExpired.into();
        assert!(AppContext::is_session_error(&err));
        assert!(!AppContext::is_session_error(&anyhow::anyhow!("other")));
    }
}
