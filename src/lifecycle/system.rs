use crate::clients::{Session, SupplyChainClient};
use crate::framework::LedgerActor;
use crate::ledger::SupplyChain;
use crate::lifecycle::LedgerConfig;
use crate::model::Principal;
use tracing::{error, info};

/// The runtime orchestrator for the custody ledger.
///
/// `SupplyChainSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the ledger task
/// - **Access**: Handing out clients and principal-bound [`Session`]s
///
/// # Architecture
///
/// The whole state lives in one [`LedgerActor<SupplyChain>`] task. Every client is a
/// clone of the same sender, so commands from any number of tasks land in a single
/// queue and are applied in one total order.
///
/// # Example
///
/// ```ignore
/// let system = SupplyChainSystem::new(LedgerConfig::default());
/// let owner = system.owner_session();
///
/// owner.add_actor("0xacme".into(), "Provider", "Acme", "1 Quarry Rd").await?;
/// let id = owner.add_new_product("Copper", "Cathode grade", None).await?;
/// system.session("0xacme").accept_phase(id).await?;
///
/// system.shutdown().await?;
/// ```
pub struct SupplyChainSystem {
    /// Client for interacting with the ledger
    pub client: SupplyChainClient,

    owner: Principal,

    /// Task handles for the running ledger (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl SupplyChainSystem {
    /// Creates the ledger from `config` and spawns its task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: LedgerConfig) -> Self {
        let LedgerConfig { owner, buffer_size } = config;
        let (actor, client) = LedgerActor::new(SupplyChain::new(owner.clone()), buffer_size);
        let handle = tokio::spawn(actor.run());
        info!(%owner, buffer_size, "Supply chain system started");

        Self {
            client: SupplyChainClient::new(client),
            owner,
            handles: vec![handle],
        }
    }

    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    /// A session acting as `principal`.
    pub fn session(&self, principal: impl Into<Principal>) -> Session {
        Session::new(principal, self.client.clone())
    }

    /// A session acting as the owner.
    pub fn owner_session(&self) -> Session {
        self.session(self.owner.clone())
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops this system's client and waits for the ledger task to finish. The task
    /// only exits once **every** clone of the client (including sessions handed out
    /// earlier) has been dropped.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the ledger shut down cleanly
    /// - `Err(String)` if the ledger task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Dropping the last sender closes the channel; the run loop sees None and exits
        drop(self.client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Ledger task failed: {:?}", e);
                return Err(format!("Ledger task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
