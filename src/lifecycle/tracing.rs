//! # Observability & Tracing
//!
//! The [`setup_tracing`] function installs the subscriber used by the demo binary.
//!
//! ## Configuration
//!
//! Output uses the compact format without the crate/module prefix (`with_target(false)`).
//! The level comes from the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Ledger lifecycle**: start, shutdown, and the final `committed` / `size` counts
//! - **Commits**: every committed command at `info` with its sequence number and receipt
//! - **Rejections**: every rejected command at `warn` with the domain error
//! - **Request flow**: one span per client call, carrying the caller
//!
//! ## Usage Examples
//!
//! ```bash
//! # Commits and rejections only
//! RUST_LOG=info cargo run
//!
//! # Full command and query payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the ledger loop
//! RUST_LOG=supply_chain_ledger::framework=debug cargo run
//! ```
//!
//! ## Sample Output
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Ledger started ledger="SupplyChain" size=0
//! INFO Committed ledger="SupplyChain" seq=1 receipt=ActorAdded { role: Provider, id: ActorId(1) }
//! INFO accept_phase{caller=0xbad}: WARN Rejected ledger="SupplyChain" error=0xbad lacks Provider authority
//! INFO Committed ledger="SupplyChain" seq=2 receipt=PhaseChanged { product_id: ProductId(1), from: Init, to: ExtractionStarted }
//! ```
//!
//! Rejected commands do not consume a sequence number, so `seq` counts commits only.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // The ledger field already names the source
        .compact() // Spans shown inline (e.g., "accept_phase{caller=...}")
        .init();
}
