//! # Supply Chain Client
//!
//! Typed API over a `LedgerClient<SupplyChain>`. Each method builds one
//! [`Command`] or [`Query`], sends it, and unpacks the matching reply variant.
//!
//! Every method takes the caller explicitly. Use [`Session`](crate::clients::Session)
//! to bind a caller once.

use crate::clients::facade::LedgerFacade;
use crate::error::SupplyChainError;
use crate::framework::LedgerClient;
use crate::ledger::{Command, Query, Receipt, SupplyChain, TrackingReport, View};
use crate::model::{ActorId, ActorView, Deadline, Phase, Principal, ProductId, ProductView, Role};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the supply chain ledger.
#[derive(Clone)]
pub struct SupplyChainClient {
    inner: LedgerClient<SupplyChain>,
}

impl SupplyChainClient {
    pub fn new(inner: LedgerClient<SupplyChain>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LedgerFacade for SupplyChainClient {
    fn inner(&self) -> &LedgerClient<SupplyChain> {
        &self.inner
    }
}

impl SupplyChainClient {
    // --- Commands ---

    /// Register `principal` under `role`. Owner only.
    ///
    /// Returns the parsed role and the new actor's id within that directory.
    #[instrument(skip(self))]
    pub async fn add_actor(
        &self,
        caller: Principal,
        principal: Principal,
        role: &str,
        name: &str,
        business_address: &str,
    ) -> Result<(Role, ActorId), SupplyChainError> {
        debug!("Sending request");
        let command = Command::AddActor {
            caller,
            principal,
            role: role.to_string(),
            name: name.to_string(),
            business_address: business_address.to_string(),
        };
        match self.submit(command).await? {
            Receipt::ActorAdded { role, id } => Ok((role, id)),
            _ => unreachable!("AddActor must return ActorAdded receipt"),
        }
    }

    /// Overwrite an actor's name and address. Owner only.
    ///
    /// Returns whether anything changed.
    #[instrument(skip(self))]
    pub async fn update_actor(
        &self,
        caller: Principal,
        role: &str,
        id: ActorId,
        name: &str,
        business_address: &str,
    ) -> Result<bool, SupplyChainError> {
        debug!("Sending request");
        let command = Command::UpdateActor {
            caller,
            role: role.to_string(),
            id,
            name: name.to_string(),
            business_address: business_address.to_string(),
        };
        match self.submit(command).await? {
            Receipt::ActorUpdated { changed, .. } => Ok(changed),
            _ => unreachable!("UpdateActor must return ActorUpdated receipt"),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_new_product(
        &self,
        caller: Principal,
        name: &str,
        description: &str,
        require_response_by: Option<Deadline>,
    ) -> Result<ProductId, SupplyChainError> {
        debug!("Sending request");
        let command = Command::AddNewProduct {
            caller,
            name: name.to_string(),
            description: description.to_string(),
            require_response_by,
        };
        match self.submit(command).await? {
            Receipt::ProductAdded(id) => Ok(id),
            _ => unreachable!("AddNewProduct must return ProductAdded receipt"),
        }
    }

    /// Advance the product's current stage. Returns the new phase.
    #[instrument(skip(self))]
    pub async fn accept_phase(
        &self,
        caller: Principal,
        product_id: ProductId,
    ) -> Result<Phase, SupplyChainError> {
        debug!("Sending request");
        self.change_phase(Command::AcceptPhase { caller, product_id })
            .await
    }

    /// Fail the product's current stage. Returns the new phase.
    #[instrument(skip(self))]
    pub async fn reject_phase(
        &self,
        caller: Principal,
        product_id: ProductId,
    ) -> Result<Phase, SupplyChainError> {
        debug!("Sending request");
        self.change_phase(Command::RejectPhase { caller, product_id })
            .await
    }

    async fn change_phase(&self, command: Command) -> Result<Phase, SupplyChainError> {
        match self.submit(command).await? {
            Receipt::PhaseChanged { to, .. } => Ok(to),
            _ => unreachable!("Phase commands must return PhaseChanged receipt"),
        }
    }

    // --- Queries ---

    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: ProductId) -> Result<ProductView, SupplyChainError> {
        match self.query(Query::GetProductById(id)).await? {
            View::Product(product) => Ok(product),
            _ => unreachable!("GetProductById must return Product view"),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductView>, SupplyChainError> {
        match self.query(Query::ListProducts).await? {
            View::Products(products) => Ok(products),
            _ => unreachable!("ListProducts must return Products view"),
        }
    }

    #[instrument(skip(self))]
    pub async fn validate_product_id(&self, id: ProductId) -> Result<bool, SupplyChainError> {
        match self.query(Query::ValidateProductId(id)).await? {
            View::Valid(valid) => Ok(valid),
            _ => unreachable!("ValidateProductId must return Valid view"),
        }
    }

    /// Label of the product's current phase, e.g. `"Resource Supply Started"`.
    #[instrument(skip(self))]
    pub async fn show_phase(&self, id: ProductId) -> Result<&'static str, SupplyChainError> {
        match self.query(Query::ShowPhase(id)).await? {
            View::PhaseLabel(label) => Ok(label),
            _ => unreachable!("ShowPhase must return PhaseLabel view"),
        }
    }

    #[instrument(skip(self))]
    pub async fn product_count(&self) -> Result<usize, SupplyChainError> {
        match self.query(Query::ProductCount).await? {
            View::Count(count) => Ok(count),
            _ => unreachable!("ProductCount must return Count view"),
        }
    }

    #[instrument(skip(self))]
    pub async fn track_product(&self, id: ProductId) -> Result<TrackingReport, SupplyChainError> {
        match self.query(Query::TrackProduct(id)).await? {
            View::Tracking(report) => Ok(report),
            _ => unreachable!("TrackProduct must return Tracking view"),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_by_role(&self, role: Role) -> Result<Vec<ActorView>, SupplyChainError> {
        match self.query(Query::ListByRole(role)).await? {
            View::Actors(actors) => Ok(actors),
            _ => unreachable!("ListByRole must return Actors view"),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_actor_by_id(
        &self,
        role: Role,
        id: ActorId,
    ) -> Result<ActorView, SupplyChainError> {
        match self.query(Query::GetActorById { role, id }).await? {
            View::Actor(actor) => Ok(actor),
            _ => unreachable!("GetActorById must return Actor view"),
        }
    }

    #[instrument(skip(self))]
    pub async fn actor_count(&self, role: Role) -> Result<usize, SupplyChainError> {
        match self.query(Query::ActorCount(role)).await? {
            View::Count(count) => Ok(count),
            _ => unreachable!("ActorCount must return Count view"),
        }
    }

    #[instrument(skip(self))]
    pub async fn resolve_principal_role(
        &self,
        principal: Principal,
    ) -> Result<Option<(Role, ActorId)>, SupplyChainError> {
        match self.query(Query::ResolvePrincipalRole(principal)).await? {
            View::PrincipalRole(resolved) => Ok(resolved),
            _ => unreachable!("ResolvePrincipalRole must return PrincipalRole view"),
        }
    }
}
