//! Generic single-writer ledger framework.
//!
//! This module provides the building blocks for hosting a state machine in its own
//! Tokio task so that every command is applied atomically and in one total order.
//!
//! # Main Components
//!
//! - [`LedgerState`] - Trait that a state machine implements to be hosted
//! - [`LedgerActor`] - Generic server that owns the state and applies requests sequentially
//! - [`LedgerClient`] - Type-safe, cloneable client for submitting commands and reads
//! - [`FrameworkError`] - Transport failures plus the rejected domain error
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning a ledger.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
