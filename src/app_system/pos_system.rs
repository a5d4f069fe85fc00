use tracing::{error, info};

use crate::actors::{AccountService, CatalogService, OrderService};
use crate::clients::{AccountClient, CatalogClient, OrderClient};
use crate::config::AppConfig;
use crate::error::AccountError;
use crate::store::Database;

/// The main application system that orchestrates all services.
///
/// Responsible for opening the store, starting the actors, wiring them
/// together, and handling shutdown.
pub struct PosSystem {
    pub catalog_client: CatalogClient,
    pub order_client: OrderClient,
    pub account_client: AccountClient,
    db: Database,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PosSystem {
    /// Opens the database and spawns the three domain services.
    pub fn start(config: &AppConfig) -> rusqlite::Result<Self> {
        let db = match &config.database_path {
            Some(path) => Database::open(path)?,
            None => Database::in_memory()?,
        };

        // 1. Account service: no dependencies of its own.
        let (account_service, account_client) =
            AccountService::new(config.channel_buffer, db.clone());
        let account_handle = tokio::spawn(account_service.run());

        // 2. Catalog service.
        let (catalog_service, catalog_client) =
            CatalogService::new(config.channel_buffer, db.clone());
        let catalog_handle = tokio::spawn(catalog_service.run());

        // 3. Order service validates buyers through the account client.
        let (order_service, order_client) =
            OrderService::new(config.channel_buffer, db.clone(), account_client.clone());
        let order_handle = tokio::spawn(order_service.run());

        Ok(Self {
            catalog_client,
            order_client,
            account_client,
            db,
            handles: vec![account_handle, catalog_handle, order_handle],
        })
    }

    /// Creates an admin account. Admins are provisioned here, out-of-band;
    /// self-service registration only ever produces customers.
    pub fn provision_admin(&self, username: &str, password: &str) -> Result<i64, AccountError> {
        self.db.provision_admin(username, password)
    }

    #[cfg(test)]
    pub(crate) fn database(&self) -> &Database {
        &self.db
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        // Dropping the clients closes the request channels; each service
        // drains what is queued and stops. The order service holds its own
        // account client, so the account service stops once that clone goes
        // down with it.
        drop(self.catalog_client);
        drop(self.order_client);
        drop(self.account_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Service task failed: {:?}", e);
                return Err(format!("Service task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
