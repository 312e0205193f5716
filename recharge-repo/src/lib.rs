//! # Recharge Repository
//!
//! The ledger store and the key-value adapters it runs on.
//! `LedgerStore` owns the storage layout; adapters implement the
//! `KeyValueStore` port.

use async_trait::async_trait;
use recharge_types::{KeyValueStore, StorageError};

pub mod ledger;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
#[cfg(test)]
mod sqlite_tests;

pub use ledger::{BALANCE_KEY, LedgerStore, TRANSACTIONS_KEY};
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// URL selecting the process-local store.
pub const MEMORY_URL: &str = "memory://";

/// Unified store wrapper selected from a URL at start-up.
pub enum Store {
    Memory(MemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStore),
}

/// Build a ledger store from a storage URL.
///
/// `memory://` selects the in-memory store; anything else is handed to
/// SQLite (requires the `sqlite` feature).
///
/// # Examples
///
/// ```ignore
/// let ledger = build_ledger("sqlite://recharge.db?mode=rwc").await?;
/// let scratch = build_ledger(MEMORY_URL).await?;
/// ```
pub async fn build_ledger(url: &str) -> anyhow::Result<LedgerStore<Store>> {
    Ok(LedgerStore::new(Store::open(url).await?))
}

impl Store {
    pub async fn open(url: &str) -> anyhow::Result<Self> {
        if url == MEMORY_URL {
            return Ok(Store::Memory(MemoryStore::new()));
        }

        #[cfg(feature = "sqlite")]
        {
            Ok(Store::Sqlite(SqliteStore::new(url).await?))
        }

        #[cfg(not(feature = "sqlite"))]
        {
            anyhow::bail!("Unsupported storage URL {url}: enable the `sqlite` feature")
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement KeyValueStore for Store (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl KeyValueStore for Store {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Store::Memory(inner) => inner.get(key).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(inner) => inner.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Store::Memory(inner) => inner.set(key, value).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(inner) => inner.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Store::Memory(inner) => inner.remove(key).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(inner) => inner.remove(key).await,
        }
    }
}
