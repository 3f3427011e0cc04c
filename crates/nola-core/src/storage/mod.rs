//! Encrypted key/value persistence.
//!
//! This module provides:
//! - `KeyValueStore`: raw byte storage keyed by a short identifier
//! - `FileStore` / `MemoryStore`: the durable and in-process backends
//! - `SecureStorage`: transparent ChaCha20-Poly1305 encryption of values
//!
//! Every persisted piece of client state (the session, preferences) goes
//! through `SecureStorage`; nothing reads the backend directly.

pub mod backend;
pub mod error;
pub mod secure;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::StorageError;
pub use secure::SecureStorage;

/// Fixed storage keys used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    User,
    Preferences,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::User => "user",
            StoreKey::Preferences => "preferences",
        }
    }
}
