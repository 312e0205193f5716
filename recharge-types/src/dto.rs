//! Data Transfer Objects (DTOs) for requests, receipts and imports.

use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionType, discount, discounted_amount};

// ─────────────────────────────────────────────────────────────────────────────
// Command DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to recharge a mobile number from the wallet.
///
/// Fields hold raw user input; the service parses and validates them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeRequest {
    /// Requested recharge amount before discount
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
}

/// Request to add funds to the wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpRequest {
    pub amount: String,
    /// Shared wallet password
    pub password: String,
}

/// Result of a committed recharge or top-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// The entry now at the head of the ledger
    pub transaction: Transaction,
    /// Wallet balance after the commit
    pub balance: f64,
    /// Whether the remote mirror accepted the push
    pub synced: bool,
}

/// Discount preview for a requested amount. No state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub requested: f64,
    pub discount: f64,
    pub payable: f64,
}

impl Quote {
    pub fn for_amount(amount: f64) -> Self {
        Self {
            requested: amount,
            discount: discount(amount),
            payable: discounted_amount(amount),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Import DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A row exported from the remote spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRow {
    /// Stored verbatim; no discount is applied on import
    pub amount: f64,
    /// `"<date> <time>"`, e.g. `"22-12-2025 09:14:32"`
    pub date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
}

impl ImportRow {
    pub fn new(amount: f64, date_time: impl Into<String>) -> Self {
        Self {
            amount,
            date_time: date_time.into(),
            mobile_number: None,
            transaction_type: None,
        }
    }

    /// Splits `date_time` on its first space into date and time.
    ///
    /// Without a space the whole string becomes the date and the time is empty.
    pub fn into_transaction(self) -> Transaction {
        let (date, time) = match self.date_time.split_once(' ') {
            Some((date, time)) => (date.to_string(), time.to_string()),
            None => (self.date_time.clone(), String::new()),
        };
        Transaction::from_parts(
            self.amount,
            date,
            time,
            self.mobile_number,
            self.transaction_type,
        )
    }
}

/// Rows used by the refresh action in place of a live spreadsheet fetch.
pub fn sample_import_rows() -> Vec<ImportRow> {
    vec![
        ImportRow::new(192.433, "22-12-2025 09:14:32"),
        ImportRow::new(289.133, "22-12-2025 09:20:11"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        let quote = Quote::for_amount(100.0);
        assert_eq!(quote.requested, 100.0);
        assert!((quote.discount - 3.3).abs() < 1e-9);
        assert_eq!(quote.payable, 100.0 - 100.0 * 0.033);
    }

    #[test]
    fn test_import_row_splits_on_first_space() {
        let tx = ImportRow::new(192.433, "22-12-2025 09:14:32 IST").into_transaction();
        assert_eq!(tx.amount, 192.433);
        assert_eq!(tx.date, "22-12-2025");
        assert_eq!(tx.time, "09:14:32 IST");
        assert!(tx.transaction_type.is_none());
    }

    #[test]
    fn test_import_row_without_time() {
        let tx = ImportRow::new(10.0, "22-12-2025").into_transaction();
        assert_eq!(tx.date, "22-12-2025");
        assert_eq!(tx.time, "");
    }

    #[test]
    fn test_import_row_json() {
        let row: ImportRow = serde_json::from_str(
            r#"{"amount":50,"dateTime":"01-01-2026 10:00:00","mobileNumber":"9876543210","type":"recharge"}"#,
        )
        .unwrap();
        let tx = row.into_transaction();
        assert_eq!(tx.mobile_number.as_deref(), Some("9876543210"));
        assert_eq!(tx.transaction_type, Some(TransactionType::Recharge));
    }
}
