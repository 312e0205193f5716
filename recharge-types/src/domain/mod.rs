//! Domain models for the recharge ledger.

pub mod money;
pub mod state;
pub mod transaction;

pub use money::{
    DEFAULT_BALANCE, DISCOUNT_RATE, discount, discounted_amount, format_rupees, parse_amount,
};
pub use state::RechargeState;
pub use transaction::{Transaction, TransactionType, validate_mobile_number};
