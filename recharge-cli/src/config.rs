//! Configuration loading from environment.

use std::env;
use std::time::Duration;

/// Default SQLite database next to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://recharge.db?mode=rwc";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Spreadsheet webhook; `None` disables the remote mirror
    pub sheets_url: Option<String>,
    /// Shared password for top-up and reset
    pub password: String,
    pub require_mobile_number: bool,
    pub http_timeout: Duration,
    /// Emit logs as JSON lines instead of the human format
    pub log_json: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url =
            lookup("RECHARGE_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let sheets_url = lookup("RECHARGE_SHEETS_URL").filter(|url| !url.trim().is_empty());

        let password = lookup("RECHARGE_PASSWORD").unwrap_or_else(|| "1234".to_string());

        let require_mobile_number = match lookup("RECHARGE_REQUIRE_MOBILE") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                anyhow::anyhow!("RECHARGE_REQUIRE_MOBILE must be true or false, got {raw:?}")
            })?,
            None => true,
        };

        let http_timeout = Duration::from_secs(
            lookup("RECHARGE_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()?,
        );

        let log_json =
            lookup("RECHARGE_LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        Ok(Self {
            database_url,
            sheets_url,
            password,
            require_mobile_number,
            http_timeout,
            log_json,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
