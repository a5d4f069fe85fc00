use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Menu item not found: {0}")]
    NotFound(i64),
    #[error("Invalid menu item: {0}")]
    Validation(String),
    #[error("Catalog storage error: {0}")]
    Storage(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(i64),
    #[error("Unknown customer: {0}")]
    UnknownCustomer(i64),
    #[error("Unknown menu item: {0}")]
    UnknownItem(i64),
    #[error("Invalid order: {0}")]
    Validation(String),
    #[error("Insufficient payment: total {required}, paid {offered}")]
    InsufficientPayment { required: f64, offered: f64 },
    #[error("Order storage error: {0}")]
    Storage(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
    #[error("Invalid registration: {0}")]
    Validation(String),
    #[error("Account storage error: {0}")]
    Storage(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for OrderError {
    fn from(err: rusqlite::Error) -> Self {
        OrderError::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for AccountError {
    fn from(err: rusqlite::Error) -> Self {
        AccountError::Storage(err.to_string())
    }
}
