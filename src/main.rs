mod actors;
mod app_system;
mod auth;
mod clients;
mod config;
mod domain;
mod error;
mod messages;
mod store;

#[cfg(test)]
mod mock_framework;

use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, PosSystem};
use crate::config::AppConfig;
use crate::domain::{MenuItemDraft, OrderLine, Registration};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting point-of-sale core");

    let config = AppConfig::from_env();
    let system = PosSystem::start(&config).map_err(|e| e.to_string())?;

    // Admins never go through self-service registration.
    system
        .provision_admin("admin", "kusina-admin")
        .map_err(|e| e.to_string())?;

    // Seed a small menu.
    let adobo = system
        .catalog_client
        .create_item(MenuItemDraft::new("Chicken Adobo", "Mains", 120.0))
        .await
        .map_err(|e| e.to_string())?;
    let lumpia = system
        .catalog_client
        .create_item(MenuItemDraft::new("Lumpia", "Sides", 45.0))
        .await
        .map_err(|e| e.to_string())?;
    let tea = system
        .catalog_client
        .create_item(MenuItemDraft::new("Iced Tea", "Drinks", 30.0))
        .await
        .map_err(|e| e.to_string())?;
    info!("Menu seeded");

    // Walk one customer through the whole flow.
    let registration = Registration {
        username: "alice".to_string(),
        password: "correct horse".to_string(),
        full_name: "Alice Santos".to_string(),
        email: "alice@example.com".to_string(),
        phone: "0917 555 0101".to_string(),
        address: "14 Mabini St".to_string(),
    };
    system
        .account_client
        .register(registration)
        .await
        .map_err(|e| e.to_string())?;

    let session = system
        .account_client
        .authenticate("alice".to_string(), "correct horse".to_string())
        .await
        .map_err(|e| e.to_string())?;
    let profile = session.profile.ok_or("customer session without profile")?;
    info!(account_id = session.account_id, role = %session.role, "Customer signed in");

    let span = tracing::info_span!("order_processing");
    let receipt = async {
        info!("Placing order");
        system
            .order_client
            .place_order(
                profile.customer_id,
                vec![
                    OrderLine { item_id: adobo, quantity: 2 },
                    OrderLine { item_id: lumpia, quantity: 1 },
                    OrderLine { item_id: tea, quantity: 2 },
                ],
                400.0,
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(
        order_id = receipt.order_id,
        total = receipt.total,
        change = receipt.change,
        "Order placed"
    );

    // Kitchen side: walk it through the preparation cycle.
    for _ in 0..2 {
        let status = system
            .order_client
            .advance_status(receipt.order_id)
            .await
            .map_err(|e| e.to_string())?;
        info!(order_id = receipt.order_id, status = %status, "Order advanced");
    }

    let history = system
        .order_client
        .orders_for_customer(profile.customer_id)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "{}",
        serde_json::to_string_pretty(&history).map_err(|e| e.to_string())?
    );

    system.shutdown().await?;

    info!("Done");
    Ok(())
}
