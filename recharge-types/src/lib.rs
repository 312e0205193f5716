//! # Recharge Types
//!
//! Domain types and port traits for the recharge ledger.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (discount rule, Transaction, recharge state machine)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Request, receipt and import shapes used at the boundaries
//! - `error/` - Domain, storage, sync and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DEFAULT_BALANCE, DISCOUNT_RATE, RechargeState, Transaction, TransactionType, discount,
    discounted_amount, format_rupees, parse_amount, validate_mobile_number,
};
pub use dto::*;
pub use error::{AppError, DomainError, GatedField, StorageError, SyncError};
pub use ports::{KeyValueStore, RemoteSync};
