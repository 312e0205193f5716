//! Remote sync port.
//!
//! The remote endpoint is a convenience mirror, never a source of truth.
//! Push methods report success as a flag and never return an error; the
//! caller owns the connection indicator built from those flags.

use chrono::NaiveDateTime;

/// Port trait for the best-effort remote mirror.
#[async_trait::async_trait]
pub trait RemoteSync: Send + Sync {
    /// Sends a probe; true if the endpoint answered with a success status.
    async fn test_connection(&self) -> bool;

    /// Syntactic check of the configured endpoint. No network access.
    fn is_url_valid(&self) -> bool;

    /// Mirrors a payable amount stamped with `at`. Returns true on success.
    async fn push_amount(&self, amount: f64, at: NaiveDateTime) -> bool;

    /// Mirrors the wallet balance. Returns true on success.
    async fn push_balance(&self, balance: f64) -> bool;
}

/// `None` is an unconfigured endpoint: never valid, every call fails.
#[async_trait::async_trait]
impl<T: RemoteSync> RemoteSync for Option<T> {
    async fn test_connection(&self) -> bool {
        match self {
            Some(inner) => inner.test_connection().await,
            None => false,
        }
    }

    fn is_url_valid(&self) -> bool {
        self.as_ref().is_some_and(|inner| inner.is_url_valid())
    }

    async fn push_amount(&self, amount: f64, at: NaiveDateTime) -> bool {
        match self {
            Some(inner) => inner.push_amount(amount, at).await,
            None => false,
        }
    }

    async fn push_balance(&self, balance: f64) -> bool {
        match self {
            Some(inner) => inner.push_balance(balance).await,
            None => false,
        }
    }
}
