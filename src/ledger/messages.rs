//! Commands, queries and their replies as they travel to and from the ledger task.

use crate::model::{ActorId, ActorView, Deadline, Phase, Principal, ProductId, ProductView, Role};
use serde::Serialize;
use std::collections::BTreeMap;

/// State-changing operations. Every command names its caller explicitly.
///
/// Role names stay raw strings here so that the owner check runs before the role is
/// parsed: a non-owner sending garbage is `Unauthorized`, not `InvalidRole`.
#[derive(Debug, Clone)]
pub enum Command {
    AddActor {
        caller: Principal,
        principal: Principal,
        role: String,
        name: String,
        business_address: String,
    },
    UpdateActor {
        caller: Principal,
        role: String,
        id: ActorId,
        name: String,
        business_address: String,
    },
    AddNewProduct {
        caller: Principal,
        name: String,
        description: String,
        require_response_by: Option<Deadline>,
    },
    AcceptPhase {
        caller: Principal,
        product_id: ProductId,
    },
    RejectPhase {
        caller: Principal,
        product_id: ProductId,
    },
}

/// What a committed command reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receipt {
    ActorAdded { role: Role, id: ActorId },
    ActorUpdated { role: Role, id: ActorId, changed: bool },
    ProductAdded(ProductId),
    PhaseChanged {
        product_id: ProductId,
        from: Phase,
        to: Phase,
    },
}

#[derive(Debug, Clone)]
pub enum Query {
    GetProductById(ProductId),
    ListProducts,
    ValidateProductId(ProductId),
    ShowPhase(ProductId),
    ListByRole(Role),
    ResolvePrincipalRole(Principal),
    GetActorById { role: Role, id: ActorId },
    ProductCount,
    ActorCount(Role),
    TrackProduct(ProductId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Product(ProductView),
    Products(Vec<ProductView>),
    Valid(bool),
    PhaseLabel(&'static str),
    Actors(Vec<ActorView>),
    PrincipalRole(Option<(Role, ActorId)>),
    Actor(ActorView),
    Count(usize),
    Tracking(TrackingReport),
}

/// A product together with the actor that handled each stage, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingReport {
    pub product: ProductView,
    pub handlers: BTreeMap<Role, Option<ActorView>>,
}
