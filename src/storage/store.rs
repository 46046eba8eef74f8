//! Key/Value Capability
//!
//! The only shared mutable resource of the service. Every component that needs
//! persistence receives an `Arc<dyn KvStore>` instead of reaching for a global,
//! so tests can swap in an in-process map and production can point at a
//! networked key/value service behind the same contract.

use async_trait::async_trait;

/// Errors raised by a [`KvStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Entries are write-once; a second `put` for the same key is rejected.
    #[error("key already exists: {0}")]
    KeyExists(String),
    /// The value stored under `key` could not be decoded.
    #[error("corrupt value under key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The backend answered with an unexpected status.
    #[error("store responded with status {0}")]
    Status(u16),
}

/// Durable key/value persistence with string values.
///
/// Values are opaque serialized documents; decoding belongs to the caller so
/// that one corrupt entry never prevents reading the others.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Stores `value` under `key`. Fails with [`StoreError::KeyExists`] if the
    /// key is already present.
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Returns the value under `key`, or `None` if it was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Enumerates every key currently stored. Order is unspecified.
    async fn list(&self) -> Result<Vec<String>, StoreError>;
}
