//! Recharge Application Service
//!
//! Orchestrates the ledger store and the remote mirror.
//! Contains NO infrastructure logic - pure business orchestration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDateTime};
use recharge_repo::LedgerStore;
use recharge_types::{
    AppError, DomainError, GatedField, ImportRow, KeyValueStore, Quote, Receipt, RechargeRequest,
    RechargeState, RemoteSync, StorageError, TopUpRequest, Transaction, discounted_amount,
    parse_amount, sample_import_rows, validate_mobile_number,
};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, instrument, warn};

/// Service settings fixed at start-up.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Shared password for top-up and reset.
    ///
    /// Compared in plaintext. This reproduces a convenience gate and is not
    /// an authentication mechanism.
    pub password: String,
    /// Whether recharges must carry a 10-digit mobile number
    pub require_mobile_number: bool,
}

impl ServiceConfig {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            require_mobile_number: true,
        }
    }

    pub fn with_require_mobile_number(mut self, required: bool) -> Self {
        self.require_mobile_number = required;
        self
    }
}

/// Application service for wallet and recharge operations.
///
/// Generic over the storage adapter and the remote mirror, both injected at
/// construction. Build one at start-up and share it by reference.
///
/// Operations that write the ledger run one at a time: each holds the
/// mutation lock from its balance read through its remote push.
pub struct RechargeService<S: KeyValueStore, R: RemoteSync> {
    ledger: LedgerStore<S>,
    sync: R,
    config: ServiceConfig,
    state: Mutex<RechargeState>,
    connected: AtomicBool,
    mutation: AsyncMutex<()>,
}

struct ValidatedRecharge {
    payable: f64,
    balance: f64,
    mobile_number: Option<String>,
}

impl<S: KeyValueStore, R: RemoteSync> RechargeService<S, R> {
    /// Creates a new service over the given ledger and mirror.
    pub fn new(ledger: LedgerStore<S>, sync: R, config: ServiceConfig) -> Self {
        Self {
            ledger,
            sync,
            config,
            state: Mutex::new(RechargeState::Idle),
            connected: AtomicBool::new(false),
            mutation: AsyncMutex::new(()),
        }
    }

    /// Returns a reference to the underlying ledger.
    pub fn ledger(&self) -> &LedgerStore<S> {
        &self.ledger
    }

    /// Returns a reference to the remote mirror.
    pub fn sync(&self) -> &R {
        &self.sync
    }

    /// State left by the most recent recharge submission.
    pub fn state(&self) -> RechargeState {
        self.lock_state().clone()
    }

    /// Connection indicator: outcome of the last remote call, forced false
    /// when a local read or write fails.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Current wallet balance.
    pub async fn balance(&self) -> f64 {
        self.ledger.balance().await
    }

    /// Ledger history, newest first.
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.ledger.transactions().await
    }

    /// Discount preview for raw amount input.
    pub fn quote(&self, amount: &str) -> Result<Quote, AppError> {
        let amount = parse_positive(amount).ok_or(DomainError::InvalidAmount)?;
        Ok(Quote::for_amount(amount))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Recharge
    // ─────────────────────────────────────────────────────────────────────────────

    /// Debits the discounted amount and records a recharge.
    ///
    /// The local commit happens first and never depends on the remote push;
    /// a failed push only shows up as `synced = false`. A failed balance read
    /// aborts with nothing written. A failed local write is reported as a
    /// persistence error without undoing earlier writes.
    #[instrument(skip(self, req), fields(amount = %req.amount))]
    pub async fn recharge(&self, req: RechargeRequest) -> Result<Receipt, AppError> {
        let _guard = self.mutation.lock().await;
        self.begin_submission()?;

        let validated = match self.validate_recharge(&req).await {
            Ok(validated) => validated,
            Err(AppError::Validation(e)) => {
                debug!("Recharge rejected: {}", e);
                self.advance(RechargeState::Rejected(e.clone()))?;
                return Err(e.into());
            }
            Err(err) => {
                error!("Error reading wallet balance: {}", err);
                self.advance(RechargeState::Failed(err.to_string()))?;
                return Err(err);
            }
        };

        self.advance(RechargeState::Debiting)?;

        let at = now();
        let transaction =
            Transaction::recharge(validated.payable, validated.mobile_number.clone(), at);
        let balance = validated.balance - validated.payable;

        if let Err(e) = self.commit(balance, transaction.clone()).await {
            error!("Error saving transaction: {}", e);
            let err = AppError::from(e);
            self.advance(RechargeState::Failed(err.to_string()))?;
            return Err(err);
        }

        let synced = self.sync.push_amount(validated.payable, at).await;
        if !synced {
            warn!("Recharge kept locally; remote mirror unavailable");
        }

        info!(
            payable = validated.payable,
            balance, synced, "Recharge completed"
        );
        self.advance(RechargeState::Persisted {
            transaction: transaction.clone(),
            synced,
        })?;

        Ok(Receipt {
            transaction,
            balance,
            synced,
        })
    }

    async fn validate_recharge(
        &self,
        req: &RechargeRequest,
    ) -> Result<ValidatedRecharge, AppError> {
        let amount = parse_positive(&req.amount).ok_or(DomainError::InvalidAmount)?;

        let mobile_number = match req.mobile_number.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() => Some(validate_mobile_number(number)?),
            _ if self.config.require_mobile_number => {
                return Err(DomainError::InvalidMobileNumber.into());
            }
            _ => None,
        };

        let payable = discounted_amount(amount);
        let balance = self.ledger.try_balance().await?;
        if payable > balance {
            return Err(DomainError::InsufficientBalance {
                available: balance,
                requested: payable,
            }
            .into());
        }

        Ok(ValidatedRecharge {
            payable,
            balance,
            mobile_number,
        })
    }

    async fn commit(&self, balance: f64, transaction: Transaction) -> Result<(), StorageError> {
        self.ledger.set_balance(balance).await?;
        self.ledger.append_transaction(transaction).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Privileged operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Adds funds to the wallet and records a credit.
    #[instrument(skip(self, req), fields(amount = %req.amount))]
    pub async fn top_up(&self, req: TopUpRequest) -> Result<Receipt, AppError> {
        let _guard = self.mutation.lock().await;
        self.check_password(&req.password, GatedField::WalletPassword)?;
        let amount = parse_positive(&req.amount).ok_or(DomainError::InvalidTopUpAmount)?;

        let (balance, transaction) = match self.credit(amount).await {
            Ok(credited) => credited,
            Err(e) => {
                error!("Error saving wallet top-up: {}", e);
                self.connected.store(false, Ordering::Relaxed);
                return Err(e.into());
            }
        };

        let synced = self.sync.push_balance(balance).await;
        self.connected.store(synced, Ordering::Relaxed);

        info!(added = amount, balance, synced, "Added to wallet");
        Ok(Receipt {
            transaction,
            balance,
            synced,
        })
    }

    async fn credit(&self, amount: f64) -> Result<(f64, Transaction), StorageError> {
        let balance = self.ledger.try_balance().await? + amount;
        let transaction = Transaction::credit(amount, now());
        self.commit(balance, transaction.clone()).await?;
        Ok((balance, transaction))
    }

    /// Clears the balance and the history.
    #[instrument(skip(self, password))]
    pub async fn reset(&self, password: &str) -> Result<(), AppError> {
        let _guard = self.mutation.lock().await;
        self.check_password(password, GatedField::ResetPassword)?;
        self.ledger.reset_all().await?;
        *self.lock_state() = RechargeState::Idle;
        Ok(())
    }

    fn check_password(&self, input: &str, field: GatedField) -> Result<(), DomainError> {
        if input == self.config.password {
            Ok(())
        } else {
            warn!(%field, "Password mismatch");
            Err(DomainError::WrongPassword { field })
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Import & remote endpoint
    // ─────────────────────────────────────────────────────────────────────────────

    /// Replaces the history with externally exported rows.
    pub async fn import(&self, rows: Vec<ImportRow>) -> Result<usize, AppError> {
        let _guard = self.mutation.lock().await;
        self.ledger.import_external(rows).await.map_err(Into::into)
    }

    /// Reloads the history from the built-in sample rows.
    pub async fn refresh(&self) -> Result<usize, AppError> {
        self.import(sample_import_rows()).await
    }

    /// Syntactic check of the remote endpoint.
    pub fn check_url(&self) -> bool {
        self.sync.is_url_valid()
    }

    /// Probes the remote endpoint and updates the connection indicator.
    pub async fn test_connection(&self) -> bool {
        let connected = self.sync.test_connection().await;
        self.connected.store(connected, Ordering::Relaxed);
        connected
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // State machine
    // ─────────────────────────────────────────────────────────────────────────────

    fn lock_state(&self) -> MutexGuard<'_, RechargeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns to `Idle` and enters `Validating`.
    fn begin_submission(&self) -> Result<(), DomainError> {
        let mut state = self.lock_state();
        let current = std::mem::take(&mut *state);
        let idle = match current {
            RechargeState::Idle => RechargeState::Idle,
            terminal if terminal.is_terminal() => terminal.transition(RechargeState::Idle)?,
            interrupted => {
                warn!(state = interrupted.name(), "Previous recharge did not finish");
                RechargeState::Idle
            }
        };
        *state = idle.transition(RechargeState::Validating)?;
        Ok(())
    }

    fn advance(&self, next: RechargeState) -> Result<(), DomainError> {
        let mut state = self.lock_state();
        let current = std::mem::take(&mut *state);
        debug!(from = current.name(), to = next.name(), "Recharge state");
        *state = current.transition(next)?;
        if let Some(connected) = state.connection_status() {
            self.connected.store(connected, Ordering::Relaxed);
        }
        Ok(())
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn parse_positive(input: &str) -> Option<f64> {
    parse_amount(input).filter(|amount| *amount > 0.0)
}
