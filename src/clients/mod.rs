use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{
    self, CustomerProfile, ItemSales, MenuItem, MenuItemDraft, OrderLine, OrderReceipt,
    OrderStatus, OrderSummary, Registration, Session,
};
use crate::error::{AccountError, CatalogError, OrderError};
use crate::messages::{AccountRequest, CatalogRequest, OrderRequest};

// =============================================================================
// Client method macro
// =============================================================================

macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunication("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunication("Actor dropped".to_string()))?
            }
        }
    };
}

// =============================================================================
// 1. Catalog Client
// =============================================================================

/// Handle for menu management and lookups.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    /// Case-insensitive name search. A pure post-filter over the full
    /// listing; issues no query of its own.
    #[instrument(skip(self))]
    pub async fn search_items(&self, needle: &str) -> Result<Vec<MenuItem>, CatalogError> {
        let items = self.list_items().await?;
        Ok(domain::filter_by_name(&items, needle))
    }
}

client_method!(CatalogClient => fn list_items() -> Vec<MenuItem> as CatalogRequest::ListItems, Error = CatalogError);
client_method!(CatalogClient => fn create_item(draft: MenuItemDraft) -> i64 as CatalogRequest::CreateItem, Error = CatalogError);
client_method!(CatalogClient => fn update_item(id: i64, draft: MenuItemDraft) -> () as CatalogRequest::UpdateItem, Error = CatalogError);
client_method!(CatalogClient => fn delete_item(id: i64) -> () as CatalogRequest::DeleteItem, Error = CatalogError);

// =============================================================================
// 2. Order Client
// =============================================================================

/// Handle for checkout, the status cycle, and order listings.
#[derive(Clone)]
pub struct OrderClient {
    sender: mpsc::Sender<OrderRequest>,
}

impl OrderClient {
    pub fn new(sender: mpsc::Sender<OrderRequest>) -> Self {
        Self { sender }
    }
}

client_method!(OrderClient => fn place_order(customer_id: i64, lines: Vec<OrderLine>, amount_paid: f64) -> OrderReceipt as OrderRequest::PlaceOrder, Error = OrderError);
client_method!(OrderClient => fn advance_status(order_id: i64) -> OrderStatus as OrderRequest::AdvanceStatus, Error = OrderError);
client_method!(OrderClient => fn orders_for_customer(customer_id: i64) -> Vec<OrderSummary> as OrderRequest::OrdersForCustomer, Error = OrderError);
client_method!(OrderClient => fn all_orders() -> Vec<OrderSummary> as OrderRequest::AllOrders, Error = OrderError);
client_method!(OrderClient => fn sales_by_item() -> Vec<ItemSales> as OrderRequest::SalesByItem, Error = OrderError);

// =============================================================================
// 3. Account Client
// =============================================================================

/// Handle for login, registration, and customer lookups.
#[derive(Clone)]
pub struct AccountClient {
    sender: mpsc::Sender<AccountRequest>,
}

impl AccountClient {
    pub fn new(sender: mpsc::Sender<AccountRequest>) -> Self {
        Self { sender }
    }

    /// Verifies a credential pair and resolves the account's role and, for
    /// customers, the linked profile.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: String,
        password: String,
    ) -> Result<Session, AccountError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(AccountRequest::Authenticate {
                username,
                password,
                respond_to,
            })
            .await
            .map_err(|_| AccountError::ActorCommunication("Actor closed".to_string()))?;

        response
            .await
            .map_err(|_| AccountError::ActorCommunication("Actor dropped".to_string()))?
    }
}

client_method!(AccountClient => fn register(registration: Registration) -> i64 as AccountRequest::Register, Error = AccountError);
client_method!(AccountClient => fn customer(customer_id: i64) -> Option<CustomerProfile> as AccountRequest::GetCustomer, Error = AccountError);
