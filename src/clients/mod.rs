//! Type-safe wrappers around [`LedgerClient`](crate::framework::LedgerClient).

pub mod facade;
pub mod session;
pub mod supply_chain_client;

pub use facade::*;
pub use session::*;
pub use supply_chain_client::*;
