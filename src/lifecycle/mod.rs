//! # System Lifecycle
//!
//! Starting, configuring, observing and stopping the ledger.
//!
//! - [`LedgerConfig`]: owner principal and channel capacity, from JSON or environment.
//! - [`SupplyChainSystem`]: spawns the ledger task and hands out clients and sessions.
//! - [`setup_tracing`](tracing::setup_tracing): installs the log subscriber.
//!
//! ## Shutdown
//!
//! ```rust,ignore
//! let system = SupplyChainSystem::new(LedgerConfig::from_env()?);
//! // ... use system.client / sessions ...
//! system.shutdown().await?;
//! ```
//!
//! `shutdown` drops the system's client and awaits the ledger task. Sessions and client
//! clones held elsewhere keep the ledger alive until they are dropped too.

pub mod config;
pub mod system;
pub mod tracing;

pub use config::*;
pub use system::*;
