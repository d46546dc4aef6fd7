//! # Supply Chain Ledger
//!
//! The complete custody state, hosted as a single [`LedgerState`].
//!
//! ## Composition
//!
//! Every command flows through the same steps:
//!
//! ```text
//! caller ─► AuthorizationGate ─► ActorRegistry / ProductRegistry ─► transition ─► commit
//! ```
//!
//! All validation happens first, on shared borrows. Only when every check has passed
//! does `apply` take the registries mutably, so a rejected command leaves the state
//! exactly as it was.
//!
//! ## Check order
//!
//! | Operation | Order |
//! |-----------|-------|
//! | `AddActor` | owner, role name, duplicate principal |
//! | `UpdateActor` | owner, role name, actor exists |
//! | `AddNewProduct` | owner, name, description |
//! | `AcceptPhase` / `RejectPhase` | product exists, terminal phase, caller role, transition table |

mod messages;

pub use messages::*;

use crate::actor_registry::ActorRegistry;
use crate::error::{Authority, Resource, SupplyChainError};
use crate::framework::LedgerState;
use crate::gate::AuthorizationGate;
use crate::model::{ActorId, Deadline, Principal, ProductCreate, ProductId, Role};
use crate::phase_machine::{self, Outcome, TransitionError};
use crate::product_registry::ProductRegistry;
use tracing::debug;

#[derive(Debug)]
pub struct SupplyChain {
    owner: Principal,
    actors: ActorRegistry,
    products: ProductRegistry,
}

impl SupplyChain {
    /// Creates an empty ledger administered by `owner`. The owner never changes.
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            actors: ActorRegistry::new(),
            products: ProductRegistry::new(),
        }
    }

    pub fn actors(&self) -> &ActorRegistry {
        &self.actors
    }

    pub fn products(&self) -> &ProductRegistry {
        &self.products
    }

    fn gate(&self) -> AuthorizationGate<'_> {
        AuthorizationGate::new(&self.owner, &self.actors)
    }

    fn add_actor(
        &mut self,
        caller: Principal,
        principal: Principal,
        role: String,
        name: String,
        business_address: String,
    ) -> Result<Receipt, SupplyChainError> {
        self.gate().require_owner(&caller)?;
        let role: Role = role.parse()?;
        let id = self.actors.add_actor(principal, role, name, business_address)?;
        Ok(Receipt::ActorAdded { role, id })
    }

    fn update_actor(
        &mut self,
        caller: Principal,
        role: String,
        id: ActorId,
        name: String,
        business_address: String,
    ) -> Result<Receipt, SupplyChainError> {
        self.gate().require_owner(&caller)?;
        let role: Role = role.parse()?;
        let changed = self.actors.update_actor(role, id, name, business_address)?;
        if !changed {
            debug!(%role, %id, "Actor unchanged");
        }
        Ok(Receipt::ActorUpdated { role, id, changed })
    }

    fn add_new_product(
        &mut self,
        caller: Principal,
        name: String,
        description: String,
        require_response_by: Option<Deadline>,
    ) -> Result<Receipt, SupplyChainError> {
        self.gate().require_owner(&caller)?;
        let id = self.products.add_new_product(
            caller,
            ProductCreate {
                name,
                description,
                require_response_by,
            },
        )?;
        Ok(Receipt::ProductAdded(id))
    }

    fn change_phase(
        &mut self,
        caller: Principal,
        product_id: ProductId,
        outcome: Outcome,
    ) -> Result<Receipt, SupplyChainError> {
        let from = self.products.get_product_by_id(product_id)?.phase;
        let (role, actor) = self.gate().authorize_phase(&caller, product_id, from)?;
        let to = phase_machine::transition(from, role, outcome)
            .map_err(|e| rejected_transition(e, product_id, &caller))?;

        self.products
            .commit_transition(product_id, caller, role, actor, to)?;
        Ok(Receipt::PhaseChanged {
            product_id,
            from,
            to,
        })
    }

    fn track_product(&self, id: ProductId) -> Result<TrackingReport, SupplyChainError> {
        let product = self.products.get_product_by_id(id)?;
        let handlers = product
            .tracking
            .iter()
            .map(|(role, actor)| {
                let view = actor
                    .and_then(|actor| self.actors.get(role, actor))
                    .map(|actor| actor.view());
                (role, view)
            })
            .collect();
        Ok(TrackingReport {
            product: product.view(),
            handlers,
        })
    }
}

/// Translates a state machine refusal into the ledger's error for `product`.
fn rejected_transition(
    error: TransitionError,
    product: ProductId,
    caller: &Principal,
) -> SupplyChainError {
    match error {
        TransitionError::Terminal(_) => SupplyChainError::TerminalPhase(product),
        TransitionError::WrongRole { required, .. } => SupplyChainError::Unauthorized {
            caller: caller.clone(),
            required: Authority::Role(required),
        },
        TransitionError::NoFailedCounterpart(phase) => {
            SupplyChainError::InvalidTransition { product, phase }
        }
    }
}

impl LedgerState for SupplyChain {
    type Command = Command;
    type Receipt = Receipt;
    type Query = Query;
    type View = View;
    type Error = SupplyChainError;

    fn apply(&mut self, command: Command) -> Result<Receipt, SupplyChainError> {
        match command {
            Command::AddActor {
                caller,
                principal,
                role,
                name,
                business_address,
            } => self.add_actor(caller, principal, role, name, business_address),
            Command::UpdateActor {
                caller,
                role,
                id,
                name,
                business_address,
            } => self.update_actor(caller, role, id, name, business_address),
            Command::AddNewProduct {
                caller,
                name,
                description,
                require_response_by,
            } => self.add_new_product(caller, name, description, require_response_by),
            Command::AcceptPhase { caller, product_id } => {
                self.change_phase(caller, product_id, Outcome::Accept)
            }
            Command::RejectPhase { caller, product_id } => {
                self.change_phase(caller, product_id, Outcome::Reject)
            }
        }
    }

    fn read(&self, query: Query) -> Result<View, SupplyChainError> {
        let view = match query {
            Query::GetProductById(id) => View::Product(self.products.get_product_by_id(id)?.view()),
            Query::ListProducts => {
                View::Products(self.products.list().iter().map(|p| p.view()).collect())
            }
            Query::ValidateProductId(id) => View::Valid(self.products.validate_product_id(id)),
            Query::ShowPhase(id) => View::PhaseLabel(self.products.show_phase(id)?),
            Query::ListByRole(role) => View::Actors(
                self.actors
                    .list_by_role(role)
                    .iter()
                    .map(|a| a.view())
                    .collect(),
            ),
            Query::ResolvePrincipalRole(principal) => {
                View::PrincipalRole(self.actors.resolve_principal_role(&principal))
            }
            Query::GetActorById { role, id } => View::Actor(
                self.actors
                    .get(role, id)
                    .ok_or(SupplyChainError::NotFound(Resource::Actor { role, id }))?
                    .view(),
            ),
            Query::ProductCount => View::Count(self.products.count()),
            Query::ActorCount(role) => View::Count(self.actors.count(role)),
            Query::TrackProduct(id) => View::Tracking(self.track_product(id)?),
        };
        Ok(view)
    }

    fn size(&self) -> usize {
        self.actors.len() + self.products.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Phase;

    const OWNER: &str = "owner";

    fn add_actor(
        ledger: &mut SupplyChain,
        principal: &str,
        role: &str,
    ) -> Result<Receipt, SupplyChainError> {
        ledger.apply(Command::AddActor {
            caller: OWNER.into(),
            principal: principal.into(),
            role: role.to_string(),
            name: format!("{role} {principal}"),
            business_address: "addr".to_string(),
        })
    }

    fn add_product(ledger: &mut SupplyChain, name: &str) -> ProductId {
        match ledger
            .apply(Command::AddNewProduct {
                caller: OWNER.into(),
                name: name.to_string(),
                description: "D".to_string(),
                require_response_by: None,
            })
            .unwrap()
        {
            Receipt::ProductAdded(id) => id,
            other => panic!("unexpected receipt {other:?}"),
        }
    }

    fn accept(
        ledger: &mut SupplyChain,
        caller: &str,
        id: ProductId,
    ) -> Result<Receipt, SupplyChainError> {
        ledger.apply(Command::AcceptPhase {
            caller: caller.into(),
            product_id: id,
        })
    }

    fn reject(
        ledger: &mut SupplyChain,
        caller: &str,
        id: ProductId,
    ) -> Result<Receipt, SupplyChainError> {
        ledger.apply(Command::RejectPhase {
            caller: caller.into(),
            product_id: id,
        })
    }

    fn phase(ledger: &SupplyChain, id: ProductId) -> Phase {
        ledger.products().get(id).unwrap().phase
    }

    /// Ledger with one actor per role: 0xprovider, 0xsupplier, ...
    fn staffed_ledger() -> SupplyChain {
        let mut ledger = SupplyChain::new(OWNER.into());
        for role in Role::ALL {
            let principal = format!("0x{}", role.as_str().to_lowercase());
            add_actor(&mut ledger, &principal, role.as_str()).unwrap();
        }
        ledger
    }

    #[test]
    fn test_custody_handoff_scenario() {
        let mut ledger = SupplyChain::new(OWNER.into());
        add_actor(&mut ledger, "0xp", "Provider").unwrap();
        add_actor(&mut ledger, "0xs", "Supplier").unwrap();
        let id = add_product(&mut ledger, "Product 1");
        assert_eq!(id, ProductId(1));
        assert_eq!(phase(&ledger, id), Phase::Init);

        assert_eq!(
            accept(&mut ledger, "0xunrelated", id),
            Err(SupplyChainError::Unauthorized {
                caller: "0xunrelated".into(),
                required: Authority::Role(Role::Provider),
            })
        );
        assert_eq!(phase(&ledger, id), Phase::Init);

        accept(&mut ledger, "0xp", id).unwrap();
        assert_eq!(phase(&ledger, id), Phase::ExtractionStarted);
        accept(&mut ledger, "0xp", id).unwrap();
        assert_eq!(phase(&ledger, id), Phase::ExtractionCompleted);
        assert_eq!(
            accept(&mut ledger, "0xs", id),
            Ok(Receipt::PhaseChanged {
                product_id: id,
                from: Phase::ExtractionCompleted,
                to: Phase::SupplyStarted,
            })
        );

        assert!(matches!(
            accept(&mut ledger, "0xp", id),
            Err(SupplyChainError::Unauthorized { .. })
        ));
        assert_eq!(phase(&ledger, id), Phase::SupplyStarted);

        let product = ledger.products().get(id).unwrap();
        assert_eq!(product.last_modified_by, Principal::from("0xs"));
        assert_eq!(product.tracking.get(Role::Provider), Some(ActorId(1)));
        assert_eq!(product.tracking.get(Role::Supplier), Some(ActorId(1)));
        assert_eq!(product.tracking.get(Role::Manufacturer), None);
    }

    #[test]
    fn test_reject_then_retry() {
        let mut ledger = staffed_ledger();
        let id = add_product(&mut ledger, "P");
        accept(&mut ledger, "0xprovider", id).unwrap();

        reject(&mut ledger, "0xprovider", id).unwrap();
        assert_eq!(phase(&ledger, id), Phase::ExtractionFailed);
        accept(&mut ledger, "0xprovider", id).unwrap();
        assert_eq!(phase(&ledger, id), Phase::ExtractionStarted);
    }

    #[test]
    fn test_full_walk_ends_in_sold() {
        let mut ledger = staffed_ledger();
        let id = add_product(&mut ledger, "P");

        let mut previous = phase(&ledger, id);
        while previous != Phase::Sold {
            let role = phase_machine::required_role(previous).unwrap();
            let caller = format!("0x{}", role.as_str().to_lowercase());
            accept(&mut ledger, &caller, id).unwrap();
            let current = phase(&ledger, id);
            assert!(current > previous);
            previous = current;
        }

        for role in Role::ALL {
            let caller = format!("0x{}", role.as_str().to_lowercase());
            assert_eq!(
                accept(&mut ledger, &caller, id),
                Err(SupplyChainError::TerminalPhase(id))
            );
            assert_eq!(
                reject(&mut ledger, &caller, id),
                Err(SupplyChainError::TerminalPhase(id))
            );
        }
        assert!(ledger
            .products()
            .get(id)
            .unwrap()
            .tracking
            .iter()
            .all(|(_, actor)| actor == Some(ActorId(1))));
    }

    #[test]
    fn test_invalid_transition_writes_nothing() {
        let mut ledger = staffed_ledger();
        let id = add_product(&mut ledger, "P");
        for caller in ["0xprovider", "0xprovider", "0xsupplier", "0xsupplier"] {
            accept(&mut ledger, caller, id).unwrap();
        }
        assert_eq!(phase(&ledger, id), Phase::SupplyCompleted);
        let before = ledger.products().get(id).unwrap().clone();

        assert_eq!(
            reject(&mut ledger, "0xmanufacturer", id),
            Err(SupplyChainError::InvalidTransition {
                product: id,
                phase: Phase::SupplyCompleted,
            })
        );
        let after = ledger.products().get(id).unwrap();
        assert_eq!(*after, before);
        assert_eq!(after.tracking.get(Role::Manufacturer), None);
    }

    #[test]
    fn test_unknown_product() {
        let mut ledger = staffed_ledger();

        assert_eq!(
            accept(&mut ledger, "0xprovider", ProductId(1)),
            Err(SupplyChainError::NotFound(Resource::Product(ProductId(1))))
        );
        assert_eq!(
            ledger.read(Query::ShowPhase(ProductId(1))),
            Err(SupplyChainError::NotFound(Resource::Product(ProductId(1))))
        );
    }

    #[test]
    fn test_add_actor_check_order() {
        let mut ledger = staffed_ledger();

        // Not the owner: refused before the role is even looked at
        assert!(matches!(
            ledger.apply(Command::AddActor {
                caller: "0xprovider".into(),
                principal: "0xnew".into(),
                role: "Pirate".into(),
                name: "n".into(),
                business_address: "a".into(),
            }),
            Err(SupplyChainError::Unauthorized {
                required: Authority::Owner,
                ..
            })
        ));
        // Bad role wins over duplicate principal
        assert_eq!(
            add_actor(&mut ledger, "0xprovider", "Pirate"),
            Err(SupplyChainError::InvalidRole("Pirate".into()))
        );
        assert_eq!(
            add_actor(&mut ledger, "0xprovider", "retailer"),
            Err(SupplyChainError::DuplicatePrincipal {
                principal: "0xprovider".into(),
                existing: Role::Provider,
            })
        );
        assert_eq!(ledger.actors().len(), 5);
    }

    #[test]
    fn test_update_actor() {
        let mut ledger = staffed_ledger();
        let update = |caller: &str, role: &str, id: u32, name: &str| Command::UpdateActor {
            caller: caller.into(),
            role: role.to_string(),
            id: ActorId(id),
            name: name.to_string(),
            business_address: "addr".to_string(),
        };

        assert!(matches!(
            ledger.apply(update("0xprovider", "Provider", 1, "Mine now")),
            Err(SupplyChainError::Unauthorized { .. })
        ));
        assert_eq!(
            ledger.apply(update(OWNER, "Nobody", 1, "x")),
            Err(SupplyChainError::InvalidRole("Nobody".into()))
        );
        assert_eq!(
            ledger.apply(update(OWNER, "Provider", 2, "x")),
            Err(SupplyChainError::NotFound(Resource::Actor {
                role: Role::Provider,
                id: ActorId(2),
            }))
        );
        assert_eq!(
            ledger.apply(update(OWNER, "Provider", 1, "Provider 0xprovider")),
            Ok(Receipt::ActorUpdated {
                role: Role::Provider,
                id: ActorId(1),
                changed: false,
            })
        );
        assert_eq!(
            ledger.apply(update(OWNER, "Provider", 1, "Acme Mining")),
            Ok(Receipt::ActorUpdated {
                role: Role::Provider,
                id: ActorId(1),
                changed: true,
            })
        );

        let View::Actor(actor) = ledger
            .read(Query::GetActorById {
                role: Role::Provider,
                id: ActorId(1),
            })
            .unwrap()
        else {
            panic!("expected actor view");
        };
        assert_eq!(actor.name, "Acme Mining");
        assert_eq!(actor.role, Role::Provider);
    }

    #[test]
    fn test_add_new_product_requires_owner_and_text() {
        let mut ledger = staffed_ledger();
        let create = |caller: &str, name: &str| Command::AddNewProduct {
            caller: caller.into(),
            name: name.to_string(),
            description: "D".to_string(),
            require_response_by: None,
        };

        assert!(matches!(
            ledger.apply(create("0xretailer", "P")),
            Err(SupplyChainError::Unauthorized { .. })
        ));
        assert_eq!(
            ledger.apply(create(OWNER, " ")),
            Err(SupplyChainError::ValidationError { field: "name" })
        );
        assert_eq!(ledger.apply(create(OWNER, "P")), Ok(Receipt::ProductAdded(ProductId(1))));
        assert_eq!(ledger.read(Query::ProductCount), Ok(View::Count(1)));
    }

    #[test]
    fn test_track_product_resolves_handlers() {
        let mut ledger = staffed_ledger();
        let id = add_product(&mut ledger, "P");
        accept(&mut ledger, "0xprovider", id).unwrap();

        let View::Tracking(report) = ledger.read(Query::TrackProduct(id)).unwrap() else {
            panic!("expected tracking report");
        };
        assert_eq!(report.product.phase, Phase::ExtractionStarted);
        assert_eq!(
            report.handlers[&Role::Provider].as_ref().map(|a| a.principal.clone()),
            Some(Principal::from("0xprovider"))
        );
        assert!(report.handlers[&Role::Supplier].is_none());
        assert_eq!(report.handlers.len(), 5);
    }

    #[test]
    fn test_queries() {
        let mut ledger = staffed_ledger();
        add_actor(&mut ledger, "0xprovider2", "Provider").unwrap();
        add_product(&mut ledger, "P");

        assert_eq!(ledger.read(Query::ValidateProductId(ProductId(1))), Ok(View::Valid(true)));
        assert_eq!(ledger.read(Query::ValidateProductId(ProductId(2))), Ok(View::Valid(false)));
        assert_eq!(ledger.read(Query::ShowPhase(ProductId(1))), Ok(View::PhaseLabel("Init")));
        assert_eq!(ledger.read(Query::ActorCount(Role::Provider)), Ok(View::Count(2)));
        assert_eq!(
            ledger.read(Query::ResolvePrincipalRole("0xprovider2".into())),
            Ok(View::PrincipalRole(Some((Role::Provider, ActorId(2)))))
        );
        assert_eq!(
            ledger.read(Query::GetActorById {
                role: Role::Retailer,
                id: ActorId(2),
            }),
            Err(SupplyChainError::NotFound(Resource::Actor {
                role: Role::Retailer,
                id: ActorId(2),
            }))
        );
        let View::Actors(providers) = ledger.read(Query::ListByRole(Role::Provider)).unwrap() else {
            panic!("expected actors");
        };
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[1].id, ActorId(2));
        assert_eq!(ledger.size(), 7);
    }
}
