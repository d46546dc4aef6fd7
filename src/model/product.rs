//! Products moving through the custody pipeline.
//!
//! Products are created by the owner in [`Phase::Init`] and afterwards only change
//! through accepted or rejected phase transitions. See
//! [`ProductRegistry`](crate::product_registry::ProductRegistry) for the operations.

use crate::model::{ActorId, Phase, Principal, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Type-safe identifier for Products. The first id is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Informational deadline attached to a product, in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(pub u64);

/// Which actor, per role, first handled a product.
///
/// A role slot stays empty until an actor of that role acts on the product, and is
/// never overwritten afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tracking {
    slots: [Option<ActorId>; 5],
}

impl Tracking {
    pub fn get(&self, role: Role) -> Option<ActorId> {
        self.slots[role.index()]
    }

    /// Records `actor` for `role` unless the slot is already taken.
    /// Returns whether anything was recorded.
    pub fn record_first(&mut self, role: Role, actor: ActorId) -> bool {
        let slot = &mut self.slots[role.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(actor);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterates `(role, actor)` for every role, in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Option<ActorId>)> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    pub fn by_role(&self) -> BTreeMap<Role, Option<ActorId>> {
        self.iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub last_modified_by: Principal,
    pub require_response_by: Option<Deadline>,
    pub phase: Phase,
    pub tracking: Tracking,
}

impl Product {
    /// Creates a new Product in [`Phase::Init`] with no tracking.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (set by the registry)
    /// * `name` - Product name
    /// * `description` - Free-form description
    /// * `created_by` - Principal recorded as the first modifier
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        created_by: Principal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            last_modified_by: created_by,
            require_response_by: None,
            phase: Phase::Init,
            tracking: Tracking::default(),
        }
    }

    pub fn view(&self) -> ProductView {
        ProductView {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            last_modified_by: self.last_modified_by.clone(),
            require_response_by: self.require_response_by,
            phase: self.phase,
            tracking: self.tracking.by_role(),
        }
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub require_response_by: Option<Deadline>,
}

/// Read-only shape of a product returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub last_modified_by: Principal,
    pub require_response_by: Option<Deadline>,
    pub phase: Phase,
    pub tracking: BTreeMap<Role, Option<ActorId>>,
}
