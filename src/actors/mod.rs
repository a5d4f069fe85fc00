use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::{AccountClient, CatalogClient, OrderClient};
use crate::domain::{OrderLine, OrderReceipt};
use crate::error::OrderError;
use crate::messages::{AccountRequest, CatalogRequest, OrderRequest, ServiceResponse};
use crate::store::{self, Database};

// =============================================================================
// CATALOG SERVICE
// =============================================================================

pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    db: Database,
}

impl CatalogService {
    pub fn new(buffer_size: usize, db: Database) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, db }, CatalogClient::new(sender))
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::ListItems { respond_to } => {
                    debug!("Processing list_items request");
                    let _ = respond_to.send(store::catalog::list_items(&self.db.conn()));
                }
                CatalogRequest::CreateItem { draft, respond_to } => {
                    let result = store::catalog::create_item(&self.db.conn(), &draft);
                    match &result {
                        Ok(id) => info!(item_id = id, name = %draft.name, "Menu item created"),
                        Err(e) => error!(error = %e, "Menu item creation failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CatalogRequest::UpdateItem { id, draft, respond_to } => {
                    let result = store::catalog::update_item(&self.db.conn(), id, &draft);
                    match &result {
                        Ok(()) => info!(item_id = id, "Menu item updated"),
                        Err(e) => error!(item_id = id, error = %e, "Menu item update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CatalogRequest::DeleteItem { id, respond_to } => {
                    let result = store::catalog::delete_item(&self.db.conn(), id);
                    match &result {
                        Ok(()) => info!(item_id = id, "Menu item deleted"),
                        Err(e) => error!(item_id = id, error = %e, "Menu item deletion failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }
        info!("CatalogService stopped");
    }
}

// =============================================================================
// ORDER SERVICE
// =============================================================================

pub struct OrderService {
    receiver: mpsc::Receiver<OrderRequest>,
    db: Database,
    account_client: AccountClient,
}

impl OrderService {
    pub fn new(
        buffer_size: usize,
        db: Database,
        account_client: AccountClient,
    ) -> (Self, OrderClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            db,
            account_client,
        };
        (service, OrderClient::new(sender))
    }

    #[instrument(name = "order_service", skip(self))]
    pub async fn run(mut self) {
        info!("OrderService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                OrderRequest::PlaceOrder {
                    customer_id,
                    lines,
                    amount_paid,
                    respond_to,
                } => {
                    self.handle_place_order(customer_id, lines, amount_paid, respond_to)
                        .await;
                }
                OrderRequest::AdvanceStatus { order_id, respond_to } => {
                    let result = store::orders::advance_status(&mut self.db.conn(), order_id);
                    match &result {
                        Ok(status) => info!(order_id, status = %status, "Order status advanced"),
                        Err(e) => error!(order_id, error = %e, "Status advance failed"),
                    }
                    let _ = respond_to.send(result);
                }
                OrderRequest::OrdersForCustomer { customer_id, respond_to } => {
                    debug!(customer_id, "Processing orders_for_customer request");
                    let _ = respond_to
                        .send(store::orders::orders_for_customer(&self.db.conn(), customer_id));
                }
                OrderRequest::AllOrders { respond_to } => {
                    debug!("Processing all_orders request");
                    let _ = respond_to.send(store::orders::all_orders(&self.db.conn()));
                }
                OrderRequest::SalesByItem { respond_to } => {
                    debug!("Processing sales_by_item request");
                    let _ = respond_to.send(store::orders::sales_by_item(&self.db.conn()));
                }
            }
        }
        info!("OrderService stopped");
    }

    #[instrument(skip(self, lines, amount_paid, respond_to))]
    async fn handle_place_order(
        &mut self,
        customer_id: i64,
        lines: Vec<OrderLine>,
        amount_paid: f64,
        respond_to: ServiceResponse<OrderReceipt, OrderError>,
    ) {
        info!("Processing place_order request");

        // Step 1: Validate the buyer through the account service.
        match self.account_client.customer(customer_id).await {
            Ok(Some(profile)) => {
                info!(customer_name = %profile.name, "Customer validation successful")
            }
            Ok(None) => {
                error!("Customer not found");
                let _ = respond_to.send(Err(OrderError::UnknownCustomer(customer_id)));
                return;
            }
            Err(e) => {
                error!(error = %e, "Customer validation failed");
                let _ = respond_to.send(Err(OrderError::Storage(format!(
                    "customer validation failed: {e}"
                ))));
                return;
            }
        }

        // Step 2: Price the lines and write header, lines, and payment as one
        // transaction.
        let result = store::orders::place_order(&mut self.db.conn(), customer_id, &lines, amount_paid);
        match &result {
            Ok(receipt) => info!(
                order_id = receipt.order_id,
                total = receipt.total,
                change = receipt.change,
                "Order placed"
            ),
            Err(e) => error!(error = %e, "Order placement failed"),
        }
        let _ = respond_to.send(result);
    }
}

// =============================================================================
// ACCOUNT SERVICE
// =============================================================================

pub struct AccountService {
    receiver: mpsc::Receiver<AccountRequest>,
    db: Database,
}

impl AccountService {
    pub fn new(buffer_size: usize, db: Database) -> (Self, AccountClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, db }, AccountClient::new(sender))
    }

    #[instrument(name = "account_service", skip(self))]
    pub async fn run(mut self) {
        info!("AccountService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AccountRequest::Authenticate { username, password, respond_to } => {
                    let result = store::accounts::authenticate(&self.db.conn(), &username, &password);
                    match &result {
                        Ok(session) => {
                            info!(account_id = session.account_id, role = %session.role, "Login successful")
                        }
                        Err(e) => debug!(username = %username, error = %e, "Login rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                AccountRequest::Register { registration, respond_to } => {
                    let result = store::accounts::register(&mut self.db.conn(), &registration);
                    match &result {
                        Ok(account_id) => {
                            info!(account_id, username = %registration.username, "Account registered")
                        }
                        Err(e) => error!(error = %e, "Registration failed"),
                    }
                    let _ = respond_to.send(result);
                }
                AccountRequest::GetCustomer { customer_id, respond_to } => {
                    debug!(customer_id, "Processing customer lookup");
                    let _ = respond_to
                        .send(store::accounts::customer_by_id(&self.db.conn(), customer_id));
                }
            }
        }
        info!("AccountService stopped");
    }
}
