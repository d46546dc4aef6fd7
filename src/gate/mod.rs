//! # Authorization Gate
//!
//! Binds a calling principal to what it is allowed to do.
//!
//! Two kinds of authority exist:
//!
//! - **Owner**: the single principal fixed when the ledger is created. Only it may
//!   register or update actors and create products.
//! - **Role**: for phase transitions the caller must resolve, through the
//!   [`ActorRegistry`] principal index, to exactly the role the product's current
//!   phase requires.
//!
//! The gate only reads. It borrows the owner and the registry for the duration of a
//! single check.

use crate::actor_registry::ActorRegistry;
use crate::error::{Authority, SupplyChainError};
use crate::model::{ActorId, Phase, Principal, ProductId, Role};
use crate::phase_machine::required_role;
use tracing::debug;

pub struct AuthorizationGate<'a> {
    owner: &'a Principal,
    actors: &'a ActorRegistry,
}

impl<'a> AuthorizationGate<'a> {
    pub fn new(owner: &'a Principal, actors: &'a ActorRegistry) -> Self {
        Self { owner, actors }
    }

    /// Fails unless `caller` is the owner.
    pub fn require_owner(&self, caller: &Principal) -> Result<(), SupplyChainError> {
        if caller == self.owner {
            return Ok(());
        }
        debug!(%caller, "Owner check failed");
        Err(SupplyChainError::Unauthorized {
            caller: caller.clone(),
            required: Authority::Owner,
        })
    }

    /// Checks that `caller` may act on `product` while it sits in `phase`.
    ///
    /// Returns the caller's `(role, actor id)` on success.
    ///
    /// # Errors
    /// - [`SupplyChainError::TerminalPhase`] if `phase` is `Sold`.
    /// - [`SupplyChainError::Unauthorized`] if `caller` is not a registered actor or
    ///   holds a different role than the one `phase` requires.
    pub fn authorize_phase(
        &self,
        caller: &Principal,
        product: ProductId,
        phase: Phase,
    ) -> Result<(Role, ActorId), SupplyChainError> {
        if phase.is_terminal() {
            return Err(SupplyChainError::TerminalPhase(product));
        }
        let required = required_role(phase).ok_or(SupplyChainError::TerminalPhase(product))?;

        match self.actors.resolve_principal_role(caller) {
            Some((role, id)) if role == required => Ok((role, id)),
            resolved => {
                debug!(%caller, %product, %required, ?resolved, "Role check failed");
                Err(SupplyChainError::Unauthorized {
                    caller: caller.clone(),
                    required: Authority::Role(required),
                })
            }
        }
    }
}
