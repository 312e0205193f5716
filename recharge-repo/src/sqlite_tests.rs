//! SQLite store integration tests.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use recharge_types::{DEFAULT_BALANCE, KeyValueStore, Transaction};
    use tempfile::tempdir;

    use crate::{LedgerStore, MEMORY_URL, SqliteStore, Store, build_ledger};

    async fn setup_store() -> SqliteStore {
        SqliteStore::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = setup_store().await;
        assert!(store.get("wallet-balance").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = setup_store().await;
        store.set("wallet-balance", "5000").await.unwrap();
        store.set("wallet-balance", "4903.3").await.unwrap();

        assert_eq!(
            store.get("wallet-balance").await.unwrap().as_deref(),
            Some("4903.3")
        );
    }

    #[tokio::test]
    async fn test_remove() {
        let store = setup_store().await;
        store.set("wallet-balance", "5000").await.unwrap();
        store.remove("wallet-balance").await.unwrap();
        store.remove("never-set").await.unwrap();

        assert!(store.get("wallet-balance").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ledger_persists_across_reopen() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("data").join("recharge.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        let at = NaiveDate::from_ymd_opt(2025, 12, 22)
            .unwrap()
            .and_hms_opt(9, 14, 32)
            .unwrap();

        {
            let ledger = LedgerStore::new(SqliteStore::new(&url).await.unwrap());
            ledger.set_balance(4903.3).await.unwrap();
            ledger
                .append_transaction(Transaction::recharge(96.7, None, at))
                .await
                .unwrap();
        }

        let ledger = build_ledger(&url).await.unwrap();
        assert!(matches!(ledger.store(), Store::Sqlite(_)));
        assert_eq!(ledger.balance().await, 4903.3);

        let transactions = ledger.transactions().await;
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, "22/12/2025");
    }

    #[tokio::test]
    async fn test_build_memory_ledger() {
        let ledger = build_ledger(MEMORY_URL).await.unwrap();
        assert!(matches!(ledger.store(), Store::Memory(_)));
        assert_eq!(ledger.balance().await, DEFAULT_BALANCE);
    }
}
