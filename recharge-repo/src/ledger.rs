//! Ledger store.
//!
//! Single source of truth for the wallet balance and the transaction
//! history. Both live in a [`KeyValueStore`] under two keys; the balance as
//! a decimal string, the history as a JSON array (newest first).
//!
//! Balance and history are written with separate calls. Callers sequence
//! them; a failure between the two leaves them out of step.

use recharge_types::{DEFAULT_BALANCE, ImportRow, KeyValueStore, StorageError, Transaction};
use tracing::{debug, info, instrument, warn};

/// Storage key holding the wallet balance.
pub const BALANCE_KEY: &str = "wallet-balance";

/// Storage key holding the JSON-encoded transaction list.
pub const TRANSACTIONS_KEY: &str = "recharge-transactions";

/// Wallet balance and transaction history over a key-value store.
pub struct LedgerStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LedgerStore<S> {
    /// Creates a ledger over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Wallet balance
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the persisted balance, or [`DEFAULT_BALANCE`] when absent.
    ///
    /// Never fails: unreadable or non-numeric values fall back to the default.
    /// Use [`try_balance`](Self::try_balance) when the result is written back.
    pub async fn balance(&self) -> f64 {
        self.try_balance().await.unwrap_or_else(|e| {
            warn!("Failed to read wallet balance, using default: {}", e);
            DEFAULT_BALANCE
        })
    }

    /// Returns the persisted balance, propagating backend read errors.
    ///
    /// An absent or non-numeric stored value still reads as [`DEFAULT_BALANCE`].
    pub async fn try_balance(&self) -> Result<f64, StorageError> {
        let balance = match self.store.get(BALANCE_KEY).await? {
            None => DEFAULT_BALANCE,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    warn!(stored = %raw, "Stored wallet balance is not a number, using default");
                    DEFAULT_BALANCE
                }
            },
        };
        Ok(balance)
    }

    /// Persists `value` as the wallet balance. No validation is applied.
    #[instrument(skip(self))]
    pub async fn set_balance(&self, value: f64) -> Result<(), StorageError> {
        self.store.set(BALANCE_KEY, &value.to_string()).await?;
        debug!("Wallet balance saved");
        Ok(())
    }

    /// Removes the stored balance; the next read returns the default.
    pub async fn reset_balance(&self) -> Result<(), StorageError> {
        self.store.remove(BALANCE_KEY).await?;
        info!("Wallet balance reset to default");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transaction history
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the stored history, newest first.
    ///
    /// Never fails: a missing, unreadable or malformed list reads as empty.
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.load_transactions().await.unwrap_or_else(|e| {
            warn!("Failed to read transactions: {}", e);
            Vec::new()
        })
    }

    /// Returns the stored history, propagating backend read errors.
    ///
    /// A missing or malformed list still reads as empty.
    pub async fn load_transactions(&self) -> Result<Vec<Transaction>, StorageError> {
        let Some(stored) = self.store.get(TRANSACTIONS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&stored) {
            Ok(transactions) => Ok(transactions),
            Err(e) => {
                warn!("Stored transactions are malformed, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Prepends `transaction` and persists the full list.
    ///
    /// A failed read aborts before anything is written.
    #[instrument(skip(self, transaction), fields(amount = transaction.amount))]
    pub async fn append_transaction(&self, transaction: Transaction) -> Result<(), StorageError> {
        let mut transactions = self.load_transactions().await?;
        transactions.insert(0, transaction);
        self.write_transactions(&transactions).await?;
        debug!(count = transactions.len(), "Transaction saved");
        Ok(())
    }

    /// Removes the stored history.
    pub async fn clear_transactions(&self) -> Result<(), StorageError> {
        self.store.remove(TRANSACTIONS_KEY).await?;
        info!("All transactions cleared");
        Ok(())
    }

    /// Replaces the history with `rows`, stored in reverse input order.
    ///
    /// Rows given oldest first therefore end up newest first. Amounts are
    /// kept verbatim. Returns the number of imported transactions.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn import_external(&self, rows: Vec<ImportRow>) -> Result<usize, StorageError> {
        let transactions: Vec<Transaction> = rows
            .into_iter()
            .rev()
            .map(ImportRow::into_transaction)
            .collect();
        self.write_transactions(&transactions).await?;
        info!("Imported {} transactions", transactions.len());
        Ok(transactions.len())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reset
    // ─────────────────────────────────────────────────────────────────────────────

    /// Clears history and balance, returning to the never-used state.
    pub async fn reset_all(&self) -> Result<(), StorageError> {
        self.clear_transactions().await?;
        self.reset_balance().await?;
        info!("All data reset - wallet balance and transactions cleared");
        Ok(())
    }

    async fn write_transactions(&self, transactions: &[Transaction]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(transactions)?;
        self.store.set(TRANSACTIONS_KEY, &encoded).await
    }
}
