use std::fmt;
use std::sync::Arc;

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::backend::validate_key;
use super::{KeyValueStore, StorageError};

/// Salt for deriving the storage key from the deployment secret.
/// The secret is fixed per deployment, so the salt is fixed per application.
const KEY_DERIVATION_SALT: &[u8] = b"nola-admin/secure-storage/v1";

/// Argon2id memory cost in KiB.
const KDF_MEMORY_KIB: u32 = 8 * 1024;

/// Argon2id iterations.
const KDF_ITERATIONS: u32 = 2;

const NONCE_LEN: usize = 12;

/// Encrypts values before they reach the backing store.
///
/// Values are encoded as JSON, sealed with ChaCha20-Poly1305 under a random
/// nonce and written as `nonce || ciphertext`. The cipher key is derived once
/// from the configured secret.
pub struct SecureStorage {
    backend: Arc<dyn KeyValueStore>,
    cipher: ChaCha20Poly1305,
}

impl fmt::Debug for SecureStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureStorage").finish_non_exhaustive()
    }
}

impl SecureStorage {
    pub fn new(backend: Arc<dyn KeyValueStore>, secret: &str) -> Result<Self, StorageError> {
        let params = Params::new(KDF_MEMORY_KIB, KDF_ITERATIONS, 1, Some(32))
            .map_err(|e| StorageError::KeyDerivation(e.to_string()))?;
        let mut key = [0u8; 32];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into(secret.as_bytes(), KEY_DERIVATION_SALT, &mut key)
            .map_err(|e| StorageError::KeyDerivation(e.to_string()))?;

        Ok(Self {
            backend,
            cipher: ChaCha20Poly1305::new(Key::from_slice(&key)),
        })
    }

    /// Encrypt `value` and write it under `key`.
    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        validate_key(key)?;
        let plaintext = serde_json::to_vec(value)?;

        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_ref())
            .map_err(|_| StorageError::Encrypt(key.to_string()))?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);
        self.backend.write(key, &blob)?;
        debug!(key = key, bytes = blob.len(), "Stored encrypted value");
        Ok(())
    }

    /// Read and decrypt the value under `key`.
    ///
    /// `Ok(None)` means nothing is stored. Stored bytes that cannot be
    /// decrypted or decoded yield `StorageError::Decrypt`.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let blob = match self.backend.read(key)? {
            Some(blob) => blob,
            None => return Ok(None),
        };

        let decrypt_error = |reason: &str| StorageError::Decrypt {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        if blob.len() < NONCE_LEN {
            return Err(decrypt_error("blob shorter than nonce"));
        }
        let (nonce, ciphertext) = blob.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| decrypt_error("authentication failed"))?;

        serde_json::from_slice(&plaintext)
            .map(Some)
            .map_err(|e| decrypt_error(&e.to_string()))
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn storage_with(backend: Arc<MemoryStore>, secret: &str) -> SecureStorage {
        SecureStorage::new(backend, secret).unwrap()
    }

    #[test]
    fn test_roundtrip_and_remove() {
        let backend = Arc::new(MemoryStore::new());
        let storage = storage_with(backend.clone(), "deploy-secret");

        storage.set_item("theme", &vec!["dark", "compact"]).unwrap();
        let value: Option<Vec<String>> = storage.get_item("theme").unwrap();
        assert_eq!(value, Some(vec!["dark".to_string(), "compact".to_string()]));

        storage.remove_item("theme").unwrap();
        let value: Option<Vec<String>> = storage.get_item("theme").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_values_are_not_stored_in_plaintext() {
        let backend = Arc::new(MemoryStore::new());
        let storage = storage_with(backend.clone(), "deploy-secret");

        storage.set_item("user", "super-visible-token").unwrap();
        let raw = backend.read("user").unwrap().unwrap();
        let needle = b"super-visible-token";
        assert!(!raw.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn test_foreign_secret_is_unreadable() {
        let backend = Arc::new(MemoryStore::new());
        storage_with(backend.clone(), "first-secret")
            .set_item("user", &42u32)
            .unwrap();

        let err = storage_with(backend, "second-secret")
            .get_item::<u32>("user")
            .unwrap_err();
        assert!(err.is_unreadable());
    }

    #[test]
    fn test_corrupted_blob_is_unreadable() {
        let backend = Arc::new(MemoryStore::new());
        let storage = storage_with(backend.clone(), "deploy-secret");
        storage.set_item("user", &42u32).unwrap();

        let mut raw = backend.read("user").unwrap().unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0xff;
        backend.write("user", &raw).unwrap();
        assert!(storage.get_item::<u32>("user").unwrap_err().is_unreadable());

        backend.write("user", b"short").unwrap();
        assert!(storage.get_item::<u32>("user").unwrap_err().is_unreadable());
    }

    #[test]
    fn test_type_mismatch_is_unreadable() {
        let backend = Arc::new(MemoryStore::new());
        let storage = storage_with(backend, "deploy-secret");
        storage.set_item("user", "not a number").unwrap();
        assert!(storage.get_item::<u32>("user").unwrap_err().is_unreadable());
    }
}
