//! # Recharge Sheets
//!
//! Best-effort mirror of ledger mutations to a spreadsheet macro webhook.
//! The endpoint only accepts POST, so nothing is ever read back; the local
//! ledger stays authoritative.

mod payload;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use recharge_types::{RemoteSync, SyncError};
use reqwest::{Client, Url};
use tracing::{debug, info, instrument, warn};

pub use payload::SyncPayload;

/// Path fragment every spreadsheet macro URL contains.
pub const SCRIPT_PATH_MARKER: &str = "script.google.com/macros/s/";

/// Spreadsheet webhook client.
pub struct SheetsClient {
    script_url: String,
    http: Client,
}

impl SheetsClient {
    /// Creates a client with the HTTP client's default settings.
    pub fn new(script_url: impl Into<String>) -> Self {
        Self::with_http(script_url, Client::new())
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(
        script_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SyncError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Http(e.to_string()))?;
        Ok(Self::with_http(script_url, http))
    }

    fn with_http(script_url: impl Into<String>, http: Client) -> Self {
        Self {
            script_url: script_url.into(),
            http,
        }
    }

    /// Returns the configured endpoint.
    pub fn script_url(&self) -> &str {
        &self.script_url
    }

    async fn post(&self, payload: &SyncPayload) -> Result<(), SyncError> {
        let resp = self
            .http
            .post(&self.script_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        // Only the status matters; the body is logged for troubleshooting.
        if let Ok(body) = resp.text().await {
            debug!(status = status.as_u16(), body = %body, "Response from spreadsheet");
        }
        Ok(())
    }

    fn record(&self, result: Result<(), SyncError>, what: &str) -> bool {
        match result {
            Ok(()) => {
                info!("{} saved to spreadsheet", what);
                true
            }
            Err(e) => {
                warn!("Error saving {} to spreadsheet, keeping local copy only: {}", what, e);
                false
            }
        }
    }
}

#[async_trait]
impl RemoteSync for SheetsClient {
    #[instrument(skip(self), fields(url = %self.script_url))]
    async fn test_connection(&self) -> bool {
        let ok = match self.post(&SyncPayload::probe()).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Spreadsheet connection test failed: {}", e);
                false
            }
        };
        info!(
            "Spreadsheet connection test: {}",
            if ok { "SUCCESS" } else { "FAILED" }
        );
        ok
    }

    fn is_url_valid(&self) -> bool {
        Url::parse(&self.script_url).is_ok() && self.script_url.contains(SCRIPT_PATH_MARKER)
    }

    #[instrument(skip(self))]
    async fn push_amount(&self, amount: f64, at: NaiveDateTime) -> bool {
        let result = self.post(&SyncPayload::amount(amount, at)).await;
        self.record(result, "amount")
    }

    #[instrument(skip(self))]
    async fn push_balance(&self, balance: f64) -> bool {
        let result = self.post(&SyncPayload::wallet(balance)).await;
        self.record(result, "wallet balance")
    }
}
