use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::storage::{SecureStorage, StorageError, StoreKey};

/// The authenticated administrator as returned by the login endpoint.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Stamped locally when the login response is decoded
    #[serde(default = "Utc::now")]
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            display_name: String::new(),
            user_id: None,
            email: None,
            avatar: None,
            description: None,
            logged_in_at: Utc::now(),
        }
    }

    /// Display name, falling back to the username
    pub fn name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .field("display_name", &self.display_name)
            .field("user_id", &self.user_id)
            .field("logged_in_at", &self.logged_in_at)
            .finish_non_exhaustive()
    }
}

/// Owner of the current session.
///
/// At most one session exists per store. Each operation completes under a
/// single lock acquisition, so a forced logout from a failing request can
/// never interleave with a login half-way through.
pub struct SessionStore {
    storage: Arc<SecureStorage>,
    current: Mutex<Option<Session>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("is_login", &self.is_login())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Rehydrate the store from encrypted storage.
    ///
    /// Anything that cannot be read back (missing, corrupt, written with
    /// another secret) starts the store logged out. So does a `null`
    /// left by a logout that could not remove the entry.
    pub fn restore(storage: Arc<SecureStorage>) -> Self {
        let persisted = storage
            .get_item::<Option<Session>>(StoreKey::User.as_str())
            .map(Option::flatten);
        let current = match persisted {
            Ok(Some(session)) => {
                debug!(username = %session.username, "Restored persisted session");
                Some(session)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable persisted session");
                None
            }
        };

        Self {
            storage,
            current: Mutex::new(current),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make `session` the current session and persist it.
    ///
    /// The session is trusted as issued by the server. On a storage error the
    /// session is still active in memory but will not survive a restart.
    pub fn login(&self, session: Session) -> Result<(), StorageError> {
        let mut current = self.lock();
        info!(username = %session.username, "Logged in");
        let persisted = self.storage.set_item(StoreKey::User.as_str(), &session);
        *current = Some(session);
        persisted
    }

    /// Clear the current session. Returns whether there was one.
    ///
    /// Safe to call any number of times. If the persisted entry cannot be
    /// removed it is overwritten with `null`; only when both fail is the
    /// error logged.
    pub fn logout(&self) -> bool {
        let mut current = self.lock();
        let had_session = current.take().is_some();
        if let Err(e) = self.storage.remove_item(StoreKey::User.as_str()) {
            debug!(error = %e, "Failed to remove persisted session, clearing it instead");
            let cleared = self
                .storage
                .set_item(StoreKey::User.as_str(), &Option::<Session>::None);
            if let Err(e) = cleared {
                warn!(error = %e, "Failed to clear persisted session");
            }
        }
        if had_session {
            info!("Logged out");
        }
        had_session
    }

    pub fn is_login(&self) -> bool {
        self.lock().is_some()
    }

    /// The current bearer token, or an empty string when logged out
    pub fn token(&self) -> String {
        self.bearer_token().unwrap_or_default()
    }

    /// The token to send, read under one lock so it cannot race a logout
    pub fn bearer_token(&self) -> Option<String> {
        self.lock().as_ref().map(|s| s.token.clone())
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};

    const SECRET: &str = "test-secret";

    /// A backend that can write but never delete.
    #[derive(Default)]
    struct NoRemoveStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for NoRemoveStore {
        fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            self.inner.read(key)
        }

        fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
            self.inner.write(key, value)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    fn storage(backend: &Arc<MemoryStore>, secret: &str) -> Arc<SecureStorage> {
        Arc::new(SecureStorage::new(backend.clone(), secret).unwrap())
    }

    fn admin() -> Session {
        let mut session = Session::new("admin", "abc123");
        session.display_name = "Site Admin".to_string();
        session.email = Some("admin@example.com".to_string());
        session
    }

    #[test]
    fn test_login_logout_scenario() {
        let backend = Arc::new(MemoryStore::new());
        let store = SessionStore::restore(storage(&backend, SECRET));
        assert!(!store.is_login());
        assert_eq!(store.token(), "");

        store.login(admin()).unwrap();
        assert!(store.is_login());
        assert_eq!(store.token(), "abc123");

        assert!(store.logout());
        assert!(!store.is_login());
        assert_eq!(store.token(), "");
    }

    #[test]
    fn test_logout_is_idempotent() {
        let backend = Arc::new(MemoryStore::new());
        let store = SessionStore::restore(storage(&backend, SECRET));
        store.login(admin()).unwrap();

        assert!(store.logout());
        assert!(!store.logout());
        assert_eq!(store.current(), None);
        assert_eq!(backend.read(StoreKey::User.as_str()).unwrap(), None);
    }

    #[test]
    fn test_session_survives_restore() {
        let backend = Arc::new(MemoryStore::new());
        let session = admin();
        SessionStore::restore(storage(&backend, SECRET))
            .login(session.clone())
            .unwrap();

        let restored = SessionStore::restore(storage(&backend, SECRET));
        assert_eq!(restored.current(), Some(session));
    }

    #[test]
    fn test_logout_survives_restore() {
        let backend = Arc::new(MemoryStore::new());
        let store = SessionStore::restore(storage(&backend, SECRET));
        store.login(admin()).unwrap();
        store.logout();

        let restored = SessionStore::restore(storage(&backend, SECRET));
        assert!(!restored.is_login());
    }

    #[test]
    fn test_logout_survives_restore_when_remove_fails() {
        let backend = Arc::new(NoRemoveStore::default());
        let open = || Arc::new(SecureStorage::new(backend.clone(), SECRET).unwrap());

        let store = SessionStore::restore(open());
        store.login(admin()).unwrap();
        assert!(SessionStore::restore(open()).is_login());

        assert!(store.logout());
        assert!(backend.read(StoreKey::User.as_str()).unwrap().is_some());

        let restored = SessionStore::restore(open());
        assert!(!restored.is_login());
        assert_eq!(restored.token(), "");
    }

    #[test]
    fn test_unreadable_storage_means_logged_out() {
        let backend = Arc::new(MemoryStore::new());
        SessionStore::restore(storage(&backend, SECRET))
            .login(admin())
            .unwrap();

        let foreign = SessionStore::restore(storage(&backend, "another-secret"));
        assert!(!foreign.is_login());

        backend.write(StoreKey::User.as_str(), b"garbage bytes here").unwrap();
        let corrupt = SessionStore::restore(storage(&backend, SECRET));
        assert!(!corrupt.is_login());
        assert_eq!(corrupt.token(), "");
    }

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"token":"t0k","username":"admin","displayName":"Admin","email":null}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.token, "t0k");
        assert_eq!(session.name(), "Admin");
        assert!(!format!("{:?}", session).contains("t0k"));
    }
}
