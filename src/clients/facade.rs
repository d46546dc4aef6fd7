use crate::error::SupplyChainError;
use crate::framework::{FrameworkError, LedgerClient};
use crate::ledger::{Command, Query, Receipt, SupplyChain, View};
use async_trait::async_trait;

/// Trait for ledger-facing clients to inherit the raw submit and read operations.
///
/// Implementors only provide access to the inner [`LedgerClient`]. Error mapping
/// and request logging come for free.
#[async_trait]
pub trait LedgerFacade: Send + Sync {
    /// Access the inner generic LedgerClient.
    fn inner(&self) -> &LedgerClient<SupplyChain>;

    /// Map framework errors to the domain error.
    ///
    /// A rejected command already carries its typed error and is passed through
    /// unchanged. Anything else means the ledger task is unreachable.
    fn map_error(e: FrameworkError<SupplyChainError>) -> SupplyChainError {
        match e {
            FrameworkError::Rejected(e) => e,
            other => SupplyChainError::LedgerUnavailable(other.to_string()),
        }
    }

    /// Submit a raw command.
    #[tracing::instrument(skip(self))]
    async fn submit(&self, command: Command) -> Result<Receipt, SupplyChainError> {
        tracing::debug!("Sending request");
        self.inner().submit(command).await.map_err(Self::map_error)
    }

    /// Run a raw query.
    #[tracing::instrument(skip(self))]
    async fn query(&self, query: Query) -> Result<View, SupplyChainError> {
        tracing::debug!("Sending request");
        self.inner().read(query).await.map_err(Self::map_error)
    }
}
