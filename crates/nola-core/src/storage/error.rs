use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to derive storage key: {0}")]
    KeyDerivation(String),

    #[error("Failed to encrypt value for {0}")]
    Encrypt(String),

    #[error("Failed to decrypt value for {key}: {reason}")]
    Decrypt { key: String, reason: String },
}

impl StorageError {
    /// True when stored bytes exist but could not be turned back into a value.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, StorageError::Decrypt { .. })
    }
}
