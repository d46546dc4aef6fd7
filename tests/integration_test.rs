use supply_chain_ledger::error::{Authority, SupplyChainError};
use supply_chain_ledger::lifecycle::{LedgerConfig, SupplyChainSystem};
use supply_chain_ledger::model::{ActorId, Deadline, Phase, Principal, ProductId, Role};
use supply_chain_ledger::phase_machine::required_role;

fn principal_for(role: Role) -> String {
    format!("0x{}", role.as_str().to_lowercase())
}

/// System with one actor per role, registered by the owner.
async fn staffed_system() -> SupplyChainSystem {
    let system = SupplyChainSystem::new(LedgerConfig::default());
    let owner = system.owner_session();
    for role in Role::ALL {
        owner
            .add_actor(
                principal_for(role).into(),
                role.as_str(),
                &format!("{role} 1"),
                "addr",
            )
            .await
            .expect("Failed to add actor");
    }
    system
}

/// Full end-to-end test of the custody handoff with the real ledger task.
#[tokio::test]
async fn test_custody_handoff_end_to_end() {
    let system = SupplyChainSystem::new(LedgerConfig::default());
    let owner = system.owner_session();

    owner
        .add_actor("0xp".into(), "Provider", "Provider 1", "addr")
        .await
        .expect("Failed to add provider");
    owner
        .add_actor("0xs".into(), "Supplier", "Supplier 1", "addr")
        .await
        .expect("Failed to add supplier");
    let id = owner
        .add_new_product("Product 1", "First product", None)
        .await
        .expect("Failed to add product");
    assert_eq!(id, ProductId(1));

    let stranger = system.session("0xunrelated");
    assert!(matches!(
        stranger.accept_phase(id).await,
        Err(SupplyChainError::Unauthorized { .. })
    ));

    let provider = system.session("0xp");
    let supplier = system.session("0xs");
    assert_eq!(provider.accept_phase(id).await, Ok(Phase::ExtractionStarted));
    assert_eq!(provider.accept_phase(id).await, Ok(Phase::ExtractionCompleted));
    assert_eq!(supplier.accept_phase(id).await, Ok(Phase::SupplyStarted));
    assert_eq!(
        provider.accept_phase(id).await,
        Err(SupplyChainError::Unauthorized {
            caller: "0xp".into(),
            required: Authority::Role(Role::Supplier),
        })
    );

    let product = system.client.get_product_by_id(id).await.unwrap();
    assert_eq!(product.phase, Phase::SupplyStarted);
    assert_eq!(product.last_modified_by, Principal::from("0xs"));
    assert_eq!(product.tracking[&Role::Provider], Some(ActorId(1)));
    assert_eq!(product.tracking[&Role::Supplier], Some(ActorId(1)));
    assert_eq!(
        system.client.show_phase(id).await,
        Ok("Resource Supply Started")
    );

    drop((owner, stranger, provider, supplier));
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_new_product_view() {
    let system = SupplyChainSystem::new(LedgerConfig::default());
    let owner = system.owner_session();

    let id = owner
        .add_new_product("P", "D", Some(Deadline(1_767_225_600)))
        .await
        .unwrap();
    let product = system.client.get_product_by_id(id).await.unwrap();

    assert_eq!(product.name, "P");
    assert_eq!(product.description, "D");
    assert_eq!(product.phase, Phase::Init);
    assert_eq!(product.last_modified_by, *system.owner());
    assert_eq!(product.require_response_by, Some(Deadline(1_767_225_600)));
    assert_eq!(product.tracking.len(), 5);
    assert!(product.tracking.values().all(Option::is_none));
    assert_eq!(system.client.validate_product_id(id).await, Ok(true));
    assert_eq!(system.client.validate_product_id(ProductId(2)).await, Ok(false));
}

#[tokio::test]
async fn test_walk_to_sold_with_retry() {
    let system = staffed_system().await;
    let id = system
        .owner_session()
        .add_new_product("Copper", "Cathode grade", None)
        .await
        .unwrap();

    let provider = system.session(principal_for(Role::Provider));
    assert_eq!(provider.accept_phase(id).await, Ok(Phase::ExtractionStarted));
    assert_eq!(provider.reject_phase(id).await, Ok(Phase::ExtractionFailed));
    assert_eq!(provider.accept_phase(id).await, Ok(Phase::ExtractionStarted));

    let mut phase = Phase::ExtractionStarted;
    while let Some(role) = required_role(phase) {
        let next = system
            .session(principal_for(role))
            .accept_phase(id)
            .await
            .unwrap();
        assert!(next > phase);
        phase = next;
    }
    assert_eq!(phase, Phase::Sold);

    for role in Role::ALL {
        let session = system.session(principal_for(role));
        assert_eq!(
            session.accept_phase(id).await,
            Err(SupplyChainError::TerminalPhase(id))
        );
        assert_eq!(
            session.reject_phase(id).await,
            Err(SupplyChainError::TerminalPhase(id))
        );
    }

    let report = system.client.track_product(id).await.unwrap();
    for role in Role::ALL {
        let handler = report.handlers[&role].as_ref().expect("Handler missing");
        assert_eq!(handler.principal, Principal::from(principal_for(role)));
        assert_eq!(handler.role, role);
    }
}

#[tokio::test]
async fn test_duplicate_principal_across_roles() {
    let system = staffed_system().await;
    let owner = system.owner_session();

    for role in Role::ALL {
        assert_eq!(
            owner
                .add_actor("0xprovider".into(), role.as_str(), "Again", "addr")
                .await,
            Err(SupplyChainError::DuplicatePrincipal {
                principal: "0xprovider".into(),
                existing: Role::Provider,
            })
        );
    }
    for role in Role::ALL {
        assert_eq!(system.client.actor_count(role).await, Ok(1));
    }
}

#[tokio::test]
async fn test_owner_only_management() {
    let system = staffed_system().await;
    let retailer = system.session(principal_for(Role::Retailer));

    let owner_required = |caller: &str| SupplyChainError::Unauthorized {
        caller: caller.into(),
        required: Authority::Owner,
    };
    assert_eq!(
        retailer.add_actor("0xnew".into(), "Nonsense", "n", "a").await,
        Err(owner_required("0xretailer"))
    );
    assert_eq!(
        retailer
            .update_actor("Retailer", ActorId(1), "Mine", "addr")
            .await,
        Err(owner_required("0xretailer"))
    );
    assert_eq!(
        retailer.add_new_product("P", "D", None).await,
        Err(owner_required("0xretailer"))
    );
    assert_eq!(system.client.product_count().await, Ok(0));

    // Owner updates go through; the role stays put
    let owner = system.owner_session();
    assert_eq!(
        owner
            .update_actor("retailer", ActorId(1), "Corner Shop", "5 High St")
            .await,
        Ok(true)
    );
    let actor = system
        .client
        .get_actor_by_id(Role::Retailer, ActorId(1))
        .await
        .unwrap();
    assert_eq!(actor.name, "Corner Shop");
    assert_eq!(actor.role, Role::Retailer);
    assert_eq!(
        retailer.role().await,
        Ok(Some((Role::Retailer, ActorId(1))))
    );
}

/// Many tasks hammering the same product: only one can win each stage.
#[tokio::test]
async fn test_concurrent_accepts_apply_once_per_phase() {
    let system = SupplyChainSystem::new(LedgerConfig::default());
    let owner = system.owner_session();
    for n in 1..=10 {
        owner
            .add_actor(format!("0xprovider{n}").into(), "Provider", "p", "addr")
            .await
            .unwrap();
    }
    let id = owner.add_new_product("P", "D", None).await.unwrap();

    let mut handles = vec![];
    for n in 1..=10 {
        let session = system.session(format!("0xprovider{n}"));
        handles.push(tokio::spawn(async move { session.accept_phase(id).await }));
    }

    let mut results = vec![];
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    // Provider may only accept twice (Init -> Started -> Completed); the rest are refused
    let mut accepted: Vec<Phase> = results.iter().filter_map(|r| r.clone().ok()).collect();
    accepted.sort();
    assert_eq!(
        accepted,
        vec![Phase::ExtractionStarted, Phase::ExtractionCompleted]
    );
    assert!(results.iter().filter(|r| r.is_err()).all(|r| matches!(
        r,
        Err(SupplyChainError::Unauthorized {
            required: Authority::Role(Role::Supplier),
            ..
        })
    )));

    let product = system.client.get_product_by_id(id).await.unwrap();
    assert_eq!(product.phase, Phase::ExtractionCompleted);
    assert!(product.tracking[&Role::Provider].is_some());
}

#[tokio::test]
async fn test_listing_queries() {
    let system = staffed_system().await;
    let owner = system.owner_session();
    owner
        .add_actor("0xsupplier2".into(), "Supplier", "Supplier 2", "addr")
        .await
        .unwrap();
    for n in 1..=3 {
        owner
            .add_new_product(&format!("Product {n}"), "D", None)
            .await
            .unwrap();
    }

    let suppliers = system.client.list_by_role(Role::Supplier).await.unwrap();
    assert_eq!(
        suppliers.iter().map(|a| a.id).collect::<Vec<_>>(),
        vec![ActorId(1), ActorId(2)]
    );
    let products = system.client.list_products().await.unwrap();
    assert_eq!(
        products.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Product 1", "Product 2", "Product 3"]
    );
    assert_eq!(
        system
            .client
            .resolve_principal_role("0xsupplier2".into())
            .await,
        Ok(Some((Role::Supplier, ActorId(2))))
    );
    assert_eq!(
        system.client.resolve_principal_role("0xnobody".into()).await,
        Ok(None)
    );
}

#[tokio::test]
async fn test_shutdown_waits_for_outstanding_clients() {
    let system = SupplyChainSystem::new(LedgerConfig::default());
    let session = system.owner_session();
    let pending = session.clone();

    let worker = tokio::spawn(async move {
        let id = pending.add_new_product("Late", "Still accepted", None).await;
        drop(pending);
        id
    });
    drop(session);

    // Shutdown only completes once the worker has dropped its session
    system.shutdown().await.expect("Shutdown failed");
    assert_eq!(worker.await.unwrap(), Ok(ProductId(1)));
}
