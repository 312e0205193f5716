//! Transaction domain model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Discounted payment for a mobile recharge (wallet debit)
    Recharge,
    /// Funds added to the wallet
    Credit,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Recharge => write!(f, "recharge"),
            TransactionType::Credit => write!(f, "credit"),
        }
    }
}

/// A recorded ledger entry.
///
/// Transactions are immutable once created. `date` and `time` are the
/// display strings captured at creation time. Entries written before the
/// type was tracked, and imported rows without one, carry no type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Payable amount for a recharge, credited amount for a top-up
    pub amount: f64,
    pub date: String,
    pub time: String,
    /// Present only on recharges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
}

impl Transaction {
    /// Creates a recharge entry stamped with `at`.
    pub fn recharge(amount: f64, mobile_number: Option<String>, at: NaiveDateTime) -> Self {
        let (date, time) = stamp(at);
        Self {
            amount,
            date,
            time,
            mobile_number,
            transaction_type: Some(TransactionType::Recharge),
        }
    }

    /// Creates a wallet credit entry stamped with `at`.
    pub fn credit(amount: f64, at: NaiveDateTime) -> Self {
        let (date, time) = stamp(at);
        Self {
            amount,
            date,
            time,
            mobile_number: None,
            transaction_type: Some(TransactionType::Credit),
        }
    }

    /// Reconstructs a transaction from stored fields.
    pub fn from_parts(
        amount: f64,
        date: String,
        time: String,
        mobile_number: Option<String>,
        transaction_type: Option<TransactionType>,
    ) -> Self {
        Self {
            amount,
            date,
            time,
            mobile_number,
            transaction_type,
        }
    }

    /// Returns true for entries that debited the wallet.
    pub fn is_recharge(&self) -> bool {
        self.transaction_type == Some(TransactionType::Recharge)
    }
}

/// Indian English style date (`dd/mm/yyyy`) and 12-hour time (`hh:mm:ss am`).
fn stamp(at: NaiveDateTime) -> (String, String) {
    (
        at.format("%d/%m/%Y").to_string(),
        at.format("%I:%M:%S %P").to_string(),
    )
}

/// Checks that a mobile number is exactly ten ASCII digits.
///
/// Surrounding whitespace is ignored; the trimmed number is returned.
pub fn validate_mobile_number(input: &str) -> Result<String, DomainError> {
    let trimmed = input.trim();
    if trimmed.len() == 10 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(DomainError::InvalidMobileNumber)
    }
}
