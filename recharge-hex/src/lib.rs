//! # Recharge Hex
//!
//! Application service layer for the recharge ledger.
//!
//! The service is generic over `S: KeyValueStore` and `R: RemoteSync`,
//! allowing different storage backends and mirrors to be injected.

pub mod service;


pub use service::{RechargeService, ServiceConfig};
