//! Supply-chain participants and their roles.
//!
//! An [`Actor`] lives in exactly one role directory of the
//! [`ActorRegistry`](crate::actor_registry::ActorRegistry). Its [`ActorId`] is only
//! unique within that directory, so an actor is addressed by the pair `(Role, ActorId)`.

use crate::error::SupplyChainError;
use crate::model::Principal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The five custody roles, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Provider,
    Supplier,
    Manufacturer,
    Distributor,
    Retailer,
}

impl Role {
    /// All roles in pipeline order.
    pub const ALL: [Role; 5] = [
        Role::Provider,
        Role::Supplier,
        Role::Manufacturer,
        Role::Distributor,
        Role::Retailer,
    ];

    /// Position of the role in [`Role::ALL`].
    pub fn index(self) -> usize {
        match self {
            Role::Provider => 0,
            Role::Supplier => 1,
            Role::Manufacturer => 2,
            Role::Distributor => 3,
            Role::Retailer => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Provider => "Provider",
            Role::Supplier => "Supplier",
            Role::Manufacturer => "Manufacturer",
            Role::Distributor => "Distributor",
            Role::Retailer => "Retailer",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a role name as it arrives from outside the core.
///
/// Surrounding whitespace is ignored and the match is case-insensitive. Anything
/// else fails with [`SupplyChainError::InvalidRole`].
impl FromStr for Role {
    type Err = SupplyChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SupplyChainError::InvalidRole(s.to_string()))
    }
}

/// Sequential identifier of an actor within its role directory. The first id is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl From<u32> for ActorId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    pub principal: Principal,
    pub role: Role,
    pub name: String,
    pub business_address: String,
}

impl Actor {
    /// Creates a new Actor record.
    ///
    /// # Arguments
    /// * `id` - Sequential id within the role directory (set by the registry)
    /// * `principal` - Account the actor acts from
    /// * `role` - Directory the actor belongs to
    /// * `name` - Display name
    /// * `business_address` - Postal/business address
    pub fn new(
        id: ActorId,
        principal: Principal,
        role: Role,
        name: impl Into<String>,
        business_address: impl Into<String>,
    ) -> Self {
        Self {
            id,
            principal,
            role,
            name: name.into(),
            business_address: business_address.into(),
        }
    }

    pub fn view(&self) -> ActorView {
        ActorView {
            principal: self.principal.clone(),
            id: self.id,
            name: self.name.clone(),
            business_address: self.business_address.clone(),
            role: self.role,
        }
    }
}

/// Read-only shape of an actor returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorView {
    pub principal: Principal,
    pub id: ActorId,
    pub name: String,
    pub business_address: String,
    pub role: Role,
}
