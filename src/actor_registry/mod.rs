//! # Actor Registry
//!
//! Five per-role directories of supply-chain participants.
//!
//! ## Overview
//!
//! Each [`Role`] has its own ordered directory. Ids are assigned sequentially within a
//! directory starting at 1, so the Provider with id 1 and the Supplier with id 1 are
//! different actors. Next to the directories the registry keeps a single
//! principal-keyed index, which is what makes principal resolution a lookup rather
//! than a scan and what enforces "one principal, one directory" across all roles.
//!
//! Actors are never removed and their role never changes.
//!
//! Owner checks are not done here: the [`AuthorizationGate`](crate::gate::AuthorizationGate)
//! runs before any registry method is called.

use crate::error::{Resource, SupplyChainError};
use crate::model::{Actor, ActorId, Principal, Role};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ActorRegistry {
    directories: [Vec<Actor>; 5],
    by_principal: HashMap<Principal, (Role, ActorId)>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new actor to the `role` directory and returns its id.
    ///
    /// # Errors
    /// [`SupplyChainError::DuplicatePrincipal`] if `principal` is registered under any role.
    pub fn add_actor(
        &mut self,
        principal: Principal,
        role: Role,
        name: impl Into<String>,
        business_address: impl Into<String>,
    ) -> Result<ActorId, SupplyChainError> {
        if let Some((existing, _)) = self.by_principal.get(&principal) {
            return Err(SupplyChainError::DuplicatePrincipal {
                principal,
                existing: *existing,
            });
        }

        let directory = &mut self.directories[role.index()];
        let id = ActorId(directory.len() as u32 + 1);
        directory.push(Actor::new(id, principal.clone(), role, name, business_address));
        debug!(%principal, %role, %id, "Actor registered");
        self.by_principal.insert(principal, (role, id));
        Ok(id)
    }

    /// Overwrites name and business address of the `(role, id)` actor.
    ///
    /// Returns `false` without touching anything when both values already match
    /// (ignoring surrounding whitespace).
    pub fn update_actor(
        &mut self,
        role: Role,
        id: ActorId,
        name: impl Into<String>,
        business_address: impl Into<String>,
    ) -> Result<bool, SupplyChainError> {
        let name = name.into();
        let business_address = business_address.into();
        let actor = self
            .directories[role.index()]
            .get_mut(slot(id))
            .ok_or(SupplyChainError::NotFound(Resource::Actor { role, id }))?;

        if actor.name.trim() == name.trim()
            && actor.business_address.trim() == business_address.trim()
        {
            return Ok(false);
        }
        actor.name = name;
        actor.business_address = business_address;
        Ok(true)
    }

    pub fn resolve_principal_role(&self, principal: &Principal) -> Option<(Role, ActorId)> {
        self.by_principal.get(principal).copied()
    }

    pub fn get(&self, role: Role, id: ActorId) -> Option<&Actor> {
        self.directories[role.index()].get(slot(id))
    }

    /// The `role` directory in registration order.
    pub fn list_by_role(&self, role: Role) -> &[Actor] {
        &self.directories[role.index()]
    }

    pub fn count(&self, role: Role) -> usize {
        self.directories[role.index()].len()
    }

    /// Total number of actors across all directories.
    pub fn len(&self) -> usize {
        self.by_principal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_principal.is_empty()
    }
}

/// Directory position of a 1-based id. Id 0 maps past the end, so it is never found.
fn slot(id: ActorId) -> usize {
    (id.0 as usize).wrapping_sub(1)
}
