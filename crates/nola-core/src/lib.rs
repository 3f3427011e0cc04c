//! Nola admin client library.
//!
//! Everything an administrator front-end needs to talk to a Nola blog: an
//! authenticated API client, the session it runs under, encrypted local
//! persistence, a typed event bus and the navigation guard for admin pages.
//!
//! Build an [`AppContext`] once at startup and pass its parts around.

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod events;
pub mod models;
pub mod preferences;
pub mod router;
pub mod storage;
pub mod utils;

pub use api::{ApiClient, ApiError, Notifier, PostQuery, TracingNotifier};
pub use auth::{CredentialStore, Session, SessionStore};
pub use config::Config;
pub use context::AppContext;
pub use events::{BusEvent, EventBus, ListenerId};
pub use preferences::{PreferenceData, Preferences, Theme};
pub use router::{Navigation, NavigationGuard, NavigationOutcome, Route, Router};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SecureStorage, StorageError, StoreKey};
