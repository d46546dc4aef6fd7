//! # Core Ledger Framework
//!
//! This module defines the generic building blocks that host the custody ledger.
//!
//! ## Key Types
//!
//! - [`LedgerState`]: The trait a state machine implements to be hosted by the ledger task.
//! - [`LedgerActor`]: The generic server that applies commands one at a time.
//! - [`LedgerClient`]: The generic client for submitting commands and reads.
//! - [`FrameworkError`]: Transport errors (ledger closed, reply dropped) plus the rejected domain error.

use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any state machine must implement to be hosted by a [`LedgerActor`].
///
/// # Architecture Note
/// The ledger is modelled as a single owner of all state. Writes are expressed as
/// `Command` values and reads as `Query` values. The hosting task applies them in
/// the order they arrive, so the sequence of commands *is* the total order of the
/// system.
///
/// Associated types keep the wiring type-safe: a `Receipt` is only ever produced by
/// `apply`, a `View` only by `read`, and both report failures through the same
/// domain `Error` type.
///
/// # Atomicity
/// `apply` must either fail without touching `self` or succeed completely. The
/// framework never observes a half-applied command because nothing else can
/// reach the state while `apply` runs.
pub trait LedgerState: Send + 'static {
    /// State-changing request.
    type Command: Send + Debug;

    /// What a successfully committed command reports back.
    type Receipt: Send + Debug;

    /// Read-only request.
    type Query: Send + Debug;

    /// What a query returns.
    type View: Send + Debug;

    /// Typed domain failure, propagated to callers unmodified.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Validate and apply a command.
    fn apply(&mut self, command: Self::Command) -> Result<Self::Receipt, Self::Error>;

    /// Answer a query against the current state.
    fn read(&self, query: Self::Query) -> Result<Self::View, Self::Error>;

    /// Number of records held, used for lifecycle logging.
    fn size(&self) -> usize {
        0
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur between a client and the ledger task.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Ledger closed")]
    LedgerClosed,
    #[error("Ledger dropped response channel")]
    LedgerDropped,
    #[error("{0}")]
    Rejected(E),
}

/// Type alias for the one-shot response channel used by the ledger task.
pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

/// Internal message type sent to the ledger task.
///
/// # Command / Query split
/// `Submit` carries a state-changing command and is the only variant that can
/// mutate the state. `Read` carries a query and is answered from the state as it
/// stands at that position in the queue, so every read observes a consistent
/// snapshot.
#[derive(Debug)]
pub enum LedgerRequest<S: LedgerState> {
    Submit {
        command: S::Command,
        respond_to: Response<S::Receipt, S::Error>,
    },
    Read {
        query: S::Query,
        respond_to: Response<S::View, S::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC LEDGER SERVER
// =============================================================================

/// The generic server that owns a [`LedgerState`] and applies requests sequentially.
///
/// # Architecture Note
/// This struct is the "Server" half of the pattern. It owns the state and the
/// receiver end of the channel. Requests are processed *sequentially* in a loop,
/// which means there is no `Mutex` around the state and no two commands can
/// interleave.
///
/// Every committed command is stamped with a sequence number (`seq`) starting at 1.
/// Rejected commands do not consume a sequence number.
pub struct LedgerActor<S: LedgerState> {
    receiver: mpsc::Receiver<LedgerRequest<S>>,
    state: S,
    committed: u64,
}

impl<S: LedgerState> LedgerActor<S> {
    /// Creates a new `LedgerActor` holding `state` and its associated [`LedgerClient`].
    ///
    /// `buffer_size` is the capacity of the request channel. When the channel is
    /// full, clients wait until there is space.
    pub fn new(state: S, buffer_size: usize) -> (Self, LedgerClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state,
            committed: 0,
        };
        let client = LedgerClient::new(sender);
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "SupplyChain" instead of the full path)
        let ledger = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(ledger, size = self.state.size(), "Ledger started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::Submit {
                    command,
                    respond_to,
                } => {
                    debug!(ledger, ?command, "Submit");
                    match self.state.apply(command) {
                        Ok(receipt) => {
                            self.committed += 1;
                            info!(ledger, seq = self.committed, ?receipt, "Committed");
                            let _ = respond_to.send(Ok(receipt));
                        }
                        Err(e) => {
                            warn!(ledger, error = %e, "Rejected");
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                        }
                    }
                }
                LedgerRequest::Read { query, respond_to } => {
                    debug!(ledger, ?query, "Read");
                    let result = self.state.read(query).map_err(FrameworkError::Rejected);
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(
            ledger,
            committed = self.committed,
            size = self.state.size(),
            "Shutdown"
        );
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a [`LedgerActor`].
///
/// Holds only a sender, so cloning is cheap and clones can be moved into tasks.
pub struct LedgerClient<S: LedgerState> {
    sender: mpsc::Sender<LedgerRequest<S>>,
}

impl<S: LedgerState> Clone for LedgerClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: LedgerState> LedgerClient<S> {
    pub fn new(sender: mpsc::Sender<LedgerRequest<S>>) -> Self {
        Self { sender }
    }

    /// Submit a command and wait for it to be committed or rejected.
    pub async fn submit(
        &self,
        command: S::Command,
    ) -> Result<S::Receipt, FrameworkError<S::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Submit {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::LedgerClosed)?;
        response.await.map_err(|_| FrameworkError::LedgerDropped)?
    }

    /// Run a query against the ledger.
    pub async fn read(&self, query: S::Query) -> Result<S::View, FrameworkError<S::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Read { query, respond_to })
            .await
            .map_err(|_| FrameworkError::LedgerClosed)?;
        response.await.map_err(|_| FrameworkError::LedgerDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
