//! # Supply Chain Ledger demo
//!
//! Starts the ledger, seeds it the way a fresh deployment is usually populated (two
//! actors per role, five products) and walks the first product all the way to `Sold`,
//! with one failed extraction along the way.
//!
//! Configuration comes from `SUPPLY_CHAIN_OWNER` / `SUPPLY_CHAIN_BUFFER_SIZE`, logging
//! from `RUST_LOG`.

use supply_chain_ledger::clients::Session;
use supply_chain_ledger::lifecycle::tracing::setup_tracing;
use supply_chain_ledger::lifecycle::{LedgerConfig, SupplyChainSystem};
use supply_chain_ledger::model::{Phase, ProductId, Role};
use supply_chain_ledger::phase_machine::required_role;
use tracing::{info, warn, Instrument};

const ACTORS_PER_ROLE: u32 = 2;
const PRODUCTS: u32 = 5;

fn principal_for(role: Role, n: u32) -> String {
    format!("0x{}{n}", role.as_str().to_lowercase())
}

async fn seed(owner: &Session) -> Result<(), String> {
    for role in Role::ALL {
        for n in 1..=ACTORS_PER_ROLE {
            owner
                .add_actor(
                    principal_for(role, n).into(),
                    role.as_str(),
                    &format!("{role} {n}"),
                    &format!("{role} {n} Address"),
                )
                .await
                .map_err(|e| e.to_string())?;
        }
    }

    for n in 1..=PRODUCTS {
        owner
            .add_new_product(&format!("Product {n}"), &format!("Description {n}"), None)
            .await
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

async fn walk_to_sold(system: &SupplyChainSystem, id: ProductId) -> Result<(), String> {
    // A stranger is turned away first
    let stranger = system.session("0xstranger");
    if let Err(e) = stranger.accept_phase(id).await {
        warn!(product_id = %id, "{}", e.user_message());
    }

    let mut phase = Phase::Init;
    let mut failed_once = false;
    while let Some(role) = required_role(phase) {
        let session = system.session(principal_for(role, 1));
        phase = if phase == Phase::ExtractionStarted && !failed_once {
            failed_once = true;
            session.reject_phase(id).await
        } else {
            session.accept_phase(id).await
        }
        .map_err(|e| e.user_message())?;
        info!(
            product_id = %id,
            principal = %session.principal(),
            %phase,
            "Phase changed"
        );
    }

    let report = system
        .client
        .track_product(id)
        .await
        .map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    info!("Tracking report:\n{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = LedgerConfig::from_env().map_err(|e| e.to_string())?;
    info!(owner = %config.owner, "Starting supply chain ledger");
    let system = SupplyChainSystem::new(config);

    let owner = system.owner_session();
    seed(&owner)
        .instrument(tracing::info_span!("seeding"))
        .await?;
    drop(owner);

    let products = system
        .client
        .product_count()
        .await
        .map_err(|e| e.to_string())?;
    info!(products, "Ledger seeded");

    walk_to_sold(&system, ProductId(1))
        .instrument(tracing::info_span!("custody_walk"))
        .await?;

    system.shutdown().await?;
    info!("Application finished successfully");
    Ok(())
}
