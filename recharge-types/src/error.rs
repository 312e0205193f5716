//! Error types for the recharge ledger.

use std::fmt;

/// Field a password gate reports its error against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedField {
    WalletPassword,
    ResetPassword,
}

impl AsRef<str> for GatedField {
    fn as_ref(&self) -> &str {
        match self {
            Self::WalletPassword => "walletPassword",
            Self::ResetPassword => "resetPassword",
        }
    }
}

impl fmt::Display for GatedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Domain-level errors (input validation and business rule violations).
///
/// Every variant is recovered locally: it is shown to the user and leaves
/// the ledger untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Please enter a valid recharge amount")]
    InvalidAmount,

    #[error("Please enter a valid amount greater than 0")]
    InvalidTopUpAmount,

    #[error("Please enter a valid 10-digit mobile number")]
    InvalidMobileNumber,

    #[error("Insufficient wallet balance")]
    InsufficientBalance { available: f64, requested: f64 },

    #[error("Incorrect password")]
    WrongPassword { field: GatedField },

    #[error("Invalid recharge state transition: {from} -> {to}")]
    InvalidStateTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// Storage-level errors (key-value backend failures).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Remote sync errors.
///
/// These never leave the sync adapter's public push methods; they are
/// logged and folded into the connection indicator.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),
}

/// Application-level errors returned by the recharge service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("Failed to save transaction. Please try again.")]
    Persistence(#[from] StorageError),
}

impl AppError {
    /// Returns true if the error came from input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Returns the gated field when the error is a password mismatch.
    pub fn gated_field(&self) -> Option<GatedField> {
        match self {
            AppError::Validation(DomainError::WrongPassword { field }) => Some(*field),
            _ => None,
        }
    }
}
