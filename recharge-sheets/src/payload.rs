//! JSON bodies accepted by the spreadsheet webhook.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One POST body. The endpoint tells them apart by shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SyncPayload {
    /// `{"action":"test"}`
    Probe { action: &'static str },
    /// `{"dateTime":"22-12-2025 09:14:32","amountToPay":"96.700"}`
    Amount {
        #[serde(rename = "dateTime")]
        date_time: String,
        #[serde(rename = "amountToPay")]
        amount_to_pay: String,
    },
    /// `{"action":"saveWallet","balance":"4903.30"}`
    Wallet { action: &'static str, balance: String },
}

impl SyncPayload {
    pub fn probe() -> Self {
        Self::Probe { action: "test" }
    }

    /// Payable amount with three decimals, stamped `DD-MM-YYYY HH:MM:SS`.
    pub fn amount(amount: f64, at: NaiveDateTime) -> Self {
        Self::Amount {
            date_time: at.format("%d-%m-%Y %H:%M:%S").to_string(),
            amount_to_pay: format!("{:.3}", amount),
        }
    }

    /// Wallet balance with two decimals.
    pub fn wallet(balance: f64) -> Self {
        Self::Wallet {
            action: "saveWallet",
            balance: format!("{:.2}", balance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_probe_shape() {
        let value = serde_json::to_value(SyncPayload::probe()).unwrap();
        assert_eq!(value, json!({"action": "test"}));
    }

    #[test]
    fn test_amount_shape() {
        let at = NaiveDate::from_ymd_opt(2025, 12, 22)
            .unwrap()
            .and_hms_opt(21, 4, 5)
            .unwrap();
        let value = serde_json::to_value(SyncPayload::amount(96.7, at)).unwrap();
        assert_eq!(
            value,
            json!({"dateTime": "22-12-2025 21:04:05", "amountToPay": "96.700"})
        );
    }

    #[test]
    fn test_wallet_shape() {
        let value = serde_json::to_value(SyncPayload::wallet(4903.3)).unwrap();
        assert_eq!(value, json!({"action": "saveWallet", "balance": "4903.30"}));
    }
}
