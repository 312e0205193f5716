//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod storage;
mod sync;

pub use storage::KeyValueStore;
pub use sync::RemoteSync;
