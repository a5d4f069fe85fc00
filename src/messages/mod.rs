use std::fmt;

use tokio::sync::oneshot;

use crate::domain::{
    CustomerProfile, ItemSales, MenuItem, MenuItemDraft, OrderLine, OrderReceipt, OrderStatus,
    OrderSummary, Registration, Session,
};
use crate::error::{AccountError, CatalogError, OrderError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for actor communication. Each variant carries its
/// parameters and a oneshot channel for the response.

#[derive(Debug)]
pub enum CatalogRequest {
    ListItems {
        respond_to: ServiceResponse<Vec<MenuItem>, CatalogError>,
    },
    CreateItem {
        draft: MenuItemDraft,
        respond_to: ServiceResponse<i64, CatalogError>,
    },
    UpdateItem {
        id: i64,
        draft: MenuItemDraft,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    DeleteItem {
        id: i64,
        respond_to: ServiceResponse<(), CatalogError>,
    },
}

#[derive(Debug)]
pub enum OrderRequest {
    PlaceOrder {
        customer_id: i64,
        lines: Vec<OrderLine>,
        amount_paid: f64,
        respond_to: ServiceResponse<OrderReceipt, OrderError>,
    },
    AdvanceStatus {
        order_id: i64,
        respond_to: ServiceResponse<OrderStatus, OrderError>,
    },
    OrdersForCustomer {
        customer_id: i64,
        respond_to: ServiceResponse<Vec<OrderSummary>, OrderError>,
    },
    AllOrders {
        respond_to: ServiceResponse<Vec<OrderSummary>, OrderError>,
    },
    SalesByItem {
        respond_to: ServiceResponse<Vec<ItemSales>, OrderError>,
    },
}

pub enum AccountRequest {
    Authenticate {
        username: String,
        password: String,
        respond_to: ServiceResponse<Session, AccountError>,
    },
    Register {
        registration: Registration,
        respond_to: ServiceResponse<i64, AccountError>,
    },
    GetCustomer {
        customer_id: i64,
        respond_to: ServiceResponse<Option<CustomerProfile>, AccountError>,
    },
}

// Hand-written so the password in Authenticate never reaches a log line.
impl fmt::Debug for AccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRequest::Authenticate { username, .. } => f
                .debug_struct("Authenticate")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish_non_exhaustive(),
            AccountRequest::Register { registration, .. } => f
                .debug_struct("Register")
                .field("registration", registration)
                .finish_non_exhaustive(),
            AccountRequest::GetCustomer { customer_id, .. } => f
                .debug_struct("GetCustomer")
                .field("customer_id", customer_id)
                .finish_non_exhaustive(),
        }
    }
}
