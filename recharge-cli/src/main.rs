//! Recharge CLI
//!
//! Command-line front end for the recharge ledger:
//! - Load configuration from environment
//! - Open the ledger store and the spreadsheet mirror
//! - Build the recharge service once and dispatch one command

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use recharge_hex::{RechargeService, ServiceConfig};
use recharge_repo::{MEMORY_URL, Store, build_ledger};
use recharge_sheets::SheetsClient;
use recharge_types::{AppError, ImportRow, RechargeRequest, TopUpRequest, format_rupees};

type Service = RechargeService<Store, Option<SheetsClient>>;

#[derive(Parser)]
#[command(name = "recharge")]
#[command(author, version, about = "Recharge discount calculator and wallet ledger", long_about = None)]
struct Cli {
    /// Storage URL (`sqlite://...` or `memory://`); overrides RECHARGE_DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    /// Keep everything in memory for this invocation only
    #[arg(long, conflicts_with = "database_url")]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the wallet balance
    Balance,
    /// List the ledger, newest first
    History {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Preview the discount on an amount without recharging
    Quote {
        amount: String,
    },
    /// Recharge a mobile number from the wallet
    Recharge {
        /// Requested amount before discount
        amount: String,
        /// 10-digit mobile number
        #[arg(long)]
        mobile: Option<String>,
    },
    /// Add funds to the wallet
    TopUp {
        amount: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the wallet balance and the ledger
    Reset {
        #[arg(long)]
        password: String,
    },
    /// Replace the ledger with exported spreadsheet rows
    Import {
        /// JSON array of `{amount, dateTime, mobileNumber?, type?}`; sample rows when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Check the spreadsheet URL format
    CheckUrl,
    /// Send a probe to the spreadsheet endpoint
    TestConnection,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Turns a service error into the message shown to the user.
fn user_error(err: AppError) -> anyhow::Error {
    if let Some(field) = err.gated_field() {
        return anyhow::anyhow!("{}: {}", field, err);
    }
    anyhow::Error::new(err)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::Config::from_env()?;
    init_tracing(config.log_json);

    let database_url = if cli.ephemeral {
        MEMORY_URL.to_string()
    } else {
        cli.database_url.unwrap_or(config.database_url.clone())
    };
    tracing::debug!("Using storage: {}", database_url);

    let ledger = build_ledger(&database_url)
        .await
        .with_context(|| format!("failed to open storage at {database_url}"))?;

    let sheets = match &config.sheets_url {
        Some(url) => Some(SheetsClient::with_timeout(url.clone(), config.http_timeout)?),
        None => None,
    };

    let service: Service = RechargeService::new(
        ledger,
        sheets,
        ServiceConfig::new(config.password.clone())
            .with_require_mobile_number(config.require_mobile_number),
    );

    run(&service, cli.command).await
}

async fn run(service: &Service, command: Commands) -> Result<()> {
    match command {
        Commands::Balance => {
            println!("Wallet balance: {}", format_rupees(service.balance().await, 2));
        }

        Commands::History { json } => {
            let transactions = service.transactions().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&transactions)?);
            } else if transactions.is_empty() {
                println!("No transactions yet");
            } else {
                for tx in transactions {
                    let kind = tx
                        .transaction_type
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    let mobile = tx.mobile_number.as_deref().unwrap_or("");
                    println!(
                        "{} {}  {:<8} {:>14}  {}",
                        tx.date,
                        tx.time,
                        kind,
                        format_rupees(tx.amount, 3),
                        mobile
                    );
                }
            }
        }

        Commands::Quote { amount } => {
            let quote = service.quote(&amount).map_err(user_error)?;
            println!("Recharge amount: {}", format_rupees(quote.requested, 2));
            println!("Discount (3.3%): {}", format_rupees(quote.discount, 3));
            println!("Amount to pay:   {}", format_rupees(quote.payable, 3));
        }

        Commands::Recharge { amount, mobile } => {
            let receipt = service
                .recharge(RechargeRequest {
                    amount,
                    mobile_number: mobile,
                })
                .await
                .map_err(user_error)?;
            println!(
                "✓ Recharge saved: paid {}",
                format_rupees(receipt.transaction.amount, 3)
            );
            println!("  Wallet balance: {}", format_rupees(receipt.balance, 2));
            if !receipt.synced {
                println!("  (spreadsheet not updated; saved locally only)");
            }
        }

        Commands::TopUp { amount, password } => {
            let receipt = service
                .top_up(TopUpRequest { amount, password })
                .await
                .map_err(user_error)?;
            println!(
                "✓ Successfully added {} to wallet!",
                format_rupees(receipt.transaction.amount, 2)
            );
            println!("  Wallet balance: {}", format_rupees(receipt.balance, 2));
        }

        Commands::Reset { password } => {
            service.reset(&password).await.map_err(user_error)?;
            println!("✓ All data reset");
        }

        Commands::Import { file } => {
            let count = match file {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("unable to read {}", path.display()))?;
                    let rows: Vec<ImportRow> = serde_json::from_str(&raw)
                        .with_context(|| format!("{} is not a list of rows", path.display()))?;
                    service.import(rows).await.map_err(user_error)?
                }
                None => service.refresh().await.map_err(user_error)?,
            };
            println!("✓ Imported {} transactions", count);
        }

        Commands::CheckUrl => {
            if service.check_url() {
                println!("✓ Spreadsheet URL is valid format");
            } else {
                println!("✗ Spreadsheet URL format is invalid");
                std::process::exit(1);
            }
        }

        Commands::TestConnection => {
            if service.test_connection().await {
                println!("✓ Connected to spreadsheet");
            } else {
                println!("✗ Failed to connect to spreadsheet");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
