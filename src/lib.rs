#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Supply Chain Ledger
//!
//! > **Custody tracking for physical products, one authorized role per stage.**
//!
//! A product travels a fixed pipeline: resource extraction, supply, manufacturing,
//! distribution, retail, sold. At every stage exactly one actor role may advance or
//! fail it. This crate holds the registries of actors and products, the phase state
//! machine, and the authorization gate that binds a calling principal to what it may
//! do, all hosted in a single Tokio task that applies operations in one total order.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One ledger, one order
//!
//! Every state change goes through a single [`LedgerActor`](framework::LedgerActor)
//! task that owns the entire [`SupplyChain`](ledger::SupplyChain) state.
//! - **Atomicity**: a command is validated completely before anything is written, so
//!   a failure leaves the state as it was.
//! - **Total order**: commands from any number of clients are applied one at a time and
//!   every commit gets a sequence number.
//! - **No locks**: the state is only ever touched from inside the run loop.
//!
//! ### Typed failures
//!
//! Failures are [`SupplyChainError`](error::SupplyChainError) values all the way to the
//! caller. The framework wraps them as `FrameworkError::Rejected` in transit and the
//! clients unwrap them again. For display, use
//! [`user_message`](error::SupplyChainError::user_message) rather than the raw error.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Pure core
//! [`phase_machine::transition`] is a pure function of `(phase, role, outcome)`. The
//! registries are plain synchronous structs. Neither knows about channels.
//!
//! ### 2. Single principal index
//! The [`ActorRegistry`](actor_registry::ActorRegistry) keeps one principal-keyed index
//! next to the five per-role directories. Resolving a caller is a lookup, and a
//! principal can only ever sit in one directory.
//!
//! ### 3. Boundary parsing
//! Raw integers and role names are turned into [`Phase`](model::Phase) and
//! [`Role`](model::Role) at the edge (`Phase::try_from(u8)`, `str::parse::<Role>()`).
//! Inside the core only the closed enums exist.
//!
//! ### 4. Observability
//! `tracing` everywhere: the run loop logs commits and rejections, client methods open
//! a span per call. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `LedgerActor<S>` / `LedgerClient<S>` pair and the [`LedgerState`](framework::LedgerState)
//! trait a state machine implements to be hosted. [`framework::mock`] has the test doubles.
//!
//! ### 2. The Domain ([`model`], [`phase_machine`], [`actor_registry`], [`product_registry`], [`gate`])
//! Records, the 14-phase pipeline, the two registries and the authorization checks.
//!
//! ### 3. The Ledger ([`ledger`])
//! Composes the domain into one `LedgerState`: the `Command`, `Query`, `Receipt` and
//! `View` vocabulary and the check order of each operation.
//!
//! ### 4. The Interface ([`clients`])
//! [`SupplyChainClient`](clients::SupplyChainClient) offers one typed method per
//! operation. [`Session`](clients::Session) binds a calling principal to it.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`SupplyChainSystem`](lifecycle::SupplyChainSystem) starts and stops the ledger from a
//! [`LedgerConfig`](lifecycle::LedgerConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```rust,ignore
//! let system = SupplyChainSystem::new(LedgerConfig::default());
//! let owner = system.owner_session();
//!
//! owner.add_actor("0xacme".into(), "Provider", "Acme Mining", "1 Quarry Rd").await?;
//! let copper = owner.add_new_product("Copper", "Cathode grade", None).await?;
//!
//! let acme = system.session("0xacme");
//! assert_eq!(acme.accept_phase(copper).await?, Phase::ExtractionStarted);
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod actor_registry;
pub mod clients;
pub mod error;
pub mod framework;
pub mod gate;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod phase_machine;
pub mod product_registry;
