//! Key-value storage port.
//!
//! The ledger keeps exactly two string values: the wallet balance and the
//! JSON-encoded transaction list. Adapters (in-memory, SQLite) implement
//! this trait.

use crate::error::StorageError;

/// Persistent local key-value storage.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
