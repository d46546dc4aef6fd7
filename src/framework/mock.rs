//! # Mock Framework
//!
//! Utilities for testing client wrappers without running a real ledger task.
//!
//! | Feature | MockClient | Real Ledger |
//! |---------|------------|-------------|
//! | **State** | None (scripted replies) | Real registries |
//! | **Determinism** | 100% deterministic | Subject to scheduler |
//! | **Error Injection** | Easy (`return_err`) | Requires reaching the failing state |
//!
//! Two styles are available:
//!
//! - The fluent [`MockClient`]: queue expectations, hand the client to the code under
//!   test, then call [`MockClient::verify`].
//! - The low-level helpers [`create_mock_client`], [`expect_submit`] and [`expect_read`]:
//!   receive the raw request yourself, assert on it, and reply through its responder.
//!
//! ```rust,ignore
//! let mut mock = MockClient::<SupplyChain>::new();
//! mock.expect_submit().return_ok(Receipt::ProductAdded(ProductId(1)));
//!
//! let client = SupplyChainClient::new(mock.client());
//! let id = client.add_new_product(owner, "Widget", "Blue", None).await?;
//! mock.verify();
//! ```

use crate::framework::{FrameworkError, LedgerClient, LedgerRequest, LedgerState};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<S: LedgerState> {
    Submit {
        response: Result<S::Receipt, FrameworkError<S::Error>>,
    },
    Read {
        response: Result<S::View, FrameworkError<S::Error>>,
    },
}

type Expectations<S> = Arc<Mutex<VecDeque<Expectation<S>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are matched against expectations strictly in FIFO order. A request of
/// the wrong kind, or a request with no expectation left, panics the mock task and
/// the caller sees [`FrameworkError::LedgerDropped`].
pub struct MockClient<S: LedgerState> {
    client: LedgerClient<S>,
    expectations: Expectations<S>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: LedgerState> Default for MockClient<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LedgerState> MockClient<S> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<LedgerRequest<S>>(100);
        let expectations: Expectations<S> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        LedgerRequest::Submit { respond_to, .. },
                        Some(Expectation::Submit { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        LedgerRequest::Read { respond_to, .. },
                        Some(Expectation::Read { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: LedgerClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> LedgerClient<S> {
        self.client.clone()
    }

    /// Expects a `submit` operation.
    pub fn expect_submit(&mut self) -> SubmitExpectationBuilder<S> {
        SubmitExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `read` operation.
    pub fn expect_read(&mut self) -> ReadExpectationBuilder<S> {
        ReadExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().expect("mock expectations poisoned");
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `submit` expectations.
pub struct SubmitExpectationBuilder<S: LedgerState> {
    expectations: Expectations<S>,
}

impl<S: LedgerState> SubmitExpectationBuilder<S> {
    /// Reply with a committed receipt.
    pub fn return_ok(self, receipt: S::Receipt) {
        self.push(Ok(receipt));
    }

    /// Reply with an error.
    pub fn return_err(self, error: FrameworkError<S::Error>) {
        self.push(Err(error));
    }

    fn push(self, response: Result<S::Receipt, FrameworkError<S::Error>>) {
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(Expectation::Submit { response });
    }
}

/// Builder for `read` expectations.
pub struct ReadExpectationBuilder<S: LedgerState> {
    expectations: Expectations<S>,
}

impl<S: LedgerState> ReadExpectationBuilder<S> {
    /// Reply with a view.
    pub fn return_ok(self, view: S::View) {
        self.push(Ok(view));
    }

    /// Reply with an error.
    pub fn return_err(self, error: FrameworkError<S::Error>) {
        self.push(Err(error));
    }

    fn push(self, response: Result<S::View, FrameworkError<S::Error>>) {
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(Expectation::Read { response });
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests land on.
///
/// Use this when a test needs to assert on the exact command or query a client
/// wrapper sends, not just on what it does with the reply.
pub fn create_mock_client<S: LedgerState>(
    buffer_size: usize,
) -> (LedgerClient<S>, mpsc::Receiver<LedgerRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (LedgerClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Submit request.
pub async fn expect_submit<S: LedgerState>(
    receiver: &mut mpsc::Receiver<LedgerRequest<S>>,
) -> Option<(
    S::Command,
    oneshot::Sender<Result<S::Receipt, FrameworkError<S::Error>>>,
)> {
    match receiver.recv().await {
        Some(LedgerRequest::Submit {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Read request.
pub async fn expect_read<S: LedgerState>(
    receiver: &mut mpsc::Receiver<LedgerRequest<S>>,
) -> Option<(
    S::Query,
    oneshot::Sender<Result<S::View, FrameworkError<S::Error>>>,
)> {
    match receiver.recv().await {
        Some(LedgerRequest::Read { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}
