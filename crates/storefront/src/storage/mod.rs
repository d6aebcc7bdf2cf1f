//! Key-value storage for the cart, the rewards balance and the mock OTP.
//!
//! # Stores
//!
//! - **Durable** ([`FileStore`]) - one file per key under the data
//!   directory. Holds [`keys::CART`] and [`keys::REWARDS`] across restarts.
//! - **Session** ([`MemoryStore`]) - process memory only. Holds
//!   [`keys::MOCK_OTP`], which must not survive a restart.
//!
//! Writes are best-effort: callers use [`write_best_effort`], which logs a
//! failed write and carries on.

mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys.
pub mod keys {
    /// Key for the serialized cart (durable).
    pub const CART: &str = "cart_v1";

    /// Key for the rewards balance (durable).
    pub const REWARDS: &str = "cred_rewards";

    /// Key for the pending mock one-time code (session).
    pub const MOCK_OTP: &str = "mock_otp";
}

/// Errors that can occur when reading or writing a store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters that are not allowed.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A stored value could not be decoded.
    #[error("Corrupt value for key {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded.
    #[error("Failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Another thread panicked while holding the store lock.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the value is not valid
/// JSON for `T`.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Encode a value as JSON and write it.
///
/// # Errors
///
/// Returns an error if encoding or the write fails.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Log the outcome of a fire-and-forget write.
///
/// Write failures are never surfaced to the user.
pub fn write_best_effort(key: &str, result: Result<(), StorageError>) {
    if let Err(e) = result {
        tracing::warn!(key, error = %e, "Storage write failed");
    }
}

/// Check that a key is safe to use as a file name.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
