//! # Mock Framework
//!
//! Utilities for testing clients and services in isolation.
//!
//! A mock client is a real client whose channel we hold the receiving end
//! of: tests inspect the requests it emits and answer them by hand through
//! the captured responders, simulating a service's behavior (success,
//! failure, absence) deterministically without spinning one up.

use tokio::sync::{mpsc, oneshot};

use crate::clients::{AccountClient, CatalogClient, OrderClient};
use crate::domain::{CustomerProfile, MenuItem, OrderLine, OrderReceipt};
use crate::error::{AccountError, CatalogError, OrderError};
use crate::messages::{AccountRequest, CatalogRequest, OrderRequest};

pub fn mock_catalog_client(buffer_size: usize) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

pub fn mock_order_client(buffer_size: usize) -> (OrderClient, mpsc::Receiver<OrderRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (OrderClient::new(sender), receiver)
}

pub fn mock_account_client(buffer_size: usize) -> (AccountClient, mpsc::Receiver<AccountRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (AccountClient::new(sender), receiver)
}

/// Helper to verify that the next catalog request is a listing
pub async fn expect_list_items(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<oneshot::Sender<Result<Vec<MenuItem>, CatalogError>>> {
    match receiver.recv().await {
        Some(CatalogRequest::ListItems { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next order request is a checkout
pub async fn expect_place_order(
    receiver: &mut mpsc::Receiver<OrderRequest>,
) -> Option<(
    i64,
    Vec<OrderLine>,
    f64,
    oneshot::Sender<Result<OrderReceipt, OrderError>>,
)> {
    match receiver.recv().await {
        Some(OrderRequest::PlaceOrder {
            customer_id,
            lines,
            amount_paid,
            respond_to,
        }) => Some((customer_id, lines, amount_paid, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next account request is a customer lookup
pub async fn expect_get_customer(
    receiver: &mut mpsc::Receiver<AccountRequest>,
) -> Option<(
    i64,
    oneshot::Sender<Result<Option<CustomerProfile>, AccountError>>,
)> {
    match receiver.recv().await {
        Some(AccountRequest::GetCustomer {
            customer_id,
            respond_to,
        }) => Some((customer_id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            category: "Drinks".to_string(),
            price: 30.0,
        }
    }

    #[tokio::test]
    async fn mock_client_roundtrip() {
        let (client, mut receiver) = mock_order_client(8);

        let task = tokio::spawn(async move {
            client
                .place_order(1, vec![OrderLine { item_id: 2, quantity: 3 }], 100.0)
                .await
        });

        let (customer_id, lines, amount_paid, responder) =
            expect_place_order(&mut receiver).await.expect("Expected PlaceOrder");
        assert_eq!(customer_id, 1);
        assert_eq!(lines, vec![OrderLine { item_id: 2, quantity: 3 }]);
        assert_eq!(amount_paid, 100.0);
        responder
            .send(Ok(OrderReceipt {
                order_id: 9,
                total: 90.0,
                change: 10.0,
            }))
            .unwrap();

        let receipt = task.await.unwrap().unwrap();
        assert_eq!(receipt.order_id, 9);
    }

    #[tokio::test]
    async fn search_issues_exactly_one_listing_request() {
        let (client, mut receiver) = mock_catalog_client(8);

        let task = tokio::spawn(async move { client.search_items("tea").await });

        let responder = expect_list_items(&mut receiver).await.expect("Expected ListItems");
        responder
            .send(Ok(vec![item(1, "Iced Tea"), item(2, "Coffee")]))
            .unwrap();

        let hits = task.await.unwrap().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Iced Tea");

        // The filter runs client-side; no further request may arrive.
        assert!(receiver.try_recv().is_err());
    }
}
