//! # Product Registry
//!
//! Sequential store of every product the owner has created.
//!
//! Ids start at 1 and follow insertion order, so a product's id is also its
//! position in [`ProductRegistry::list`]. Products are never removed.
//!
//! The only mutation after creation is [`ProductRegistry::commit_transition`], which
//! expects the caller to have validated the transition already.

use crate::error::{Resource, SupplyChainError};
use crate::model::{ActorId, Phase, Principal, Product, ProductCreate, ProductId, Role};
use tracing::debug;

#[derive(Debug, Default)]
pub struct ProductRegistry {
    products: Vec<Product>,
}

impl ProductRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a product in [`Phase::Init`] recorded as last modified by `caller`.
    ///
    /// # Errors
    /// [`SupplyChainError::ValidationError`] if the name or description is blank.
    pub fn add_new_product(
        &mut self,
        caller: Principal,
        payload: ProductCreate,
    ) -> Result<ProductId, SupplyChainError> {
        if payload.name.trim().is_empty() {
            return Err(SupplyChainError::ValidationError { field: "name" });
        }
        if payload.description.trim().is_empty() {
            return Err(SupplyChainError::ValidationError {
                field: "description",
            });
        }

        let id = ProductId(self.products.len() as u32 + 1);
        let mut product = Product::new(id, payload.name, payload.description, caller);
        product.require_response_by = payload.require_response_by;
        debug!(%id, name = %product.name, "Product created");
        self.products.push(product);
        Ok(id)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(slot(id))
    }

    /// Like [`get`](Self::get) but fails with [`SupplyChainError::NotFound`].
    pub fn get_product_by_id(&self, id: ProductId) -> Result<&Product, SupplyChainError> {
        self.get(id)
            .ok_or(SupplyChainError::NotFound(Resource::Product(id)))
    }

    /// True iff `1 <= id <= count`.
    pub fn validate_product_id(&self, id: ProductId) -> bool {
        id.0 >= 1 && id.0 as usize <= self.products.len()
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn show_phase(&self, id: ProductId) -> Result<&'static str, SupplyChainError> {
        self.get_product_by_id(id).map(|product| product.phase.label())
    }

    pub fn count(&self) -> usize {
        self.products.len()
    }

    /// Writes an already validated transition.
    ///
    /// Records `actor` as the `role` handler if that slot is still empty, then stamps
    /// `caller` as last modifier and moves the product to `next`.
    pub fn commit_transition(
        &mut self,
        id: ProductId,
        caller: Principal,
        role: Role,
        actor: ActorId,
        next: Phase,
    ) -> Result<(), SupplyChainError> {
        let product = self
            .products
            .get_mut(slot(id))
            .ok_or(SupplyChainError::NotFound(Resource::Product(id)))?;

        if product.tracking.record_first(role, actor) {
            debug!(%id, %role, %actor, "Handler recorded");
        }
        product.last_modified_by = caller;
        product.phase = next;
        Ok(())
    }
}

fn slot(id: ProductId) -> usize {
    (id.0 as usize).wrapping_sub(1)
}
