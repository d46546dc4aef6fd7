use crate::clients::SupplyChainClient;
use crate::error::SupplyChainError;
use crate::model::{ActorId, Deadline, Phase, Principal, ProductId, Role};
use tracing::instrument;

/// A client bound to one calling principal.
///
/// Every command sent through a session carries the session's principal as its
/// caller. Failures come back exactly as the ledger produced them.
#[derive(Clone)]
pub struct Session {
    principal: Principal,
    client: SupplyChainClient,
}

impl Session {
    pub fn new(principal: impl Into<Principal>, client: SupplyChainClient) -> Self {
        Self {
            principal: principal.into(),
            client,
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// The underlying client, for queries.
    pub fn client(&self) -> &SupplyChainClient {
        &self.client
    }

    /// Which directory, if any, this session's principal is registered in.
    #[instrument(skip(self), fields(principal = %self.principal))]
    pub async fn role(&self) -> Result<Option<(Role, ActorId)>, SupplyChainError> {
        self.client
            .resolve_principal_role(self.principal.clone())
            .await
    }

    #[instrument(skip(self), fields(caller = %self.principal))]
    pub async fn add_actor(
        &self,
        principal: Principal,
        role: &str,
        name: &str,
        business_address: &str,
    ) -> Result<(Role, ActorId), SupplyChainError> {
        self.client
            .add_actor(
                self.principal.clone(),
                principal,
                role,
                name,
                business_address,
            )
            .await
    }

    #[instrument(skip(self), fields(caller = %self.principal))]
    pub async fn update_actor(
        &self,
        role: &str,
        id: ActorId,
        name: &str,
        business_address: &str,
    ) -> Result<bool, SupplyChainError> {
        self.client
            .update_actor(self.principal.clone(), role, id, name, business_address)
            .await
    }

    #[instrument(skip(self), fields(caller = %self.principal))]
    pub async fn add_new_product(
        &self,
        name: &str,
        description: &str,
        require_response_by: Option<Deadline>,
    ) -> Result<ProductId, SupplyChainError> {
        self.client
            .add_new_product(self.principal.clone(), name, description, require_response_by)
            .await
    }

    #[instrument(skip(self), fields(caller = %self.principal))]
    pub async fn accept_phase(&self, product_id: ProductId) -> Result<Phase, SupplyChainError> {
        self.client
            .accept_phase(self.principal.clone(), product_id)
            .await
    }

    #[instrument(skip(self), fields(caller = %self.principal))]
    pub async fn reject_phase(&self, product_id: ProductId) -> Result<Phase, SupplyChainError> {
        self.client
            .reject_phase(self.principal.clone(), product_id)
            .await
    }
}
