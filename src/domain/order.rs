use std::fmt;

use serde::Serialize;

/// Lifecycle of an order. Advances only forward along the preparation cycle;
/// Completed and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// The fixed transition table. Nothing here ever produces Cancelled;
    /// that status is set outside the workflow and only tolerated by it.
    pub fn next(self) -> OrderStatus {
        match self {
            OrderStatus::Pending => OrderStatus::Preparing,
            OrderStatus::Preparing => OrderStatus::Completed,
            OrderStatus::Completed => OrderStatus::Completed,
            OrderStatus::Cancelled => OrderStatus::Cancelled,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(raw: &str) -> Option<OrderStatus> {
        match raw {
            "Pending" => Some(OrderStatus::Pending),
            "Preparing" => Some(OrderStatus::Preparing),
            "Completed" => Some(OrderStatus::Completed),
            "Cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One menu item and quantity within an order to be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub item_id: i64,
    pub quantity: u32,
}

/// Outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub order_id: i64,
    pub total: f64,
    pub change: f64,
}

/// One row of order history, shaped for direct display.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order_id: i64,
    pub customer_name: String,
    pub order_date: String,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub payment_method: String,
    pub amount_paid: f64,
    pub change_amount: f64,
    /// Human-readable "Name x2, Other x1" line. Lines whose menu item was
    /// deleted render as `item #<id>`.
    pub items: String,
}

/// Revenue attributed to one menu item across non-cancelled orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSales {
    pub name: String,
    pub revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_reaches_completed_in_exactly_two_steps() {
        let first = OrderStatus::Pending.next();
        assert_eq!(first, OrderStatus::Preparing);
        assert_eq!(first.next(), OrderStatus::Completed);
    }

    #[test]
    fn terminal_statuses_are_idempotent() {
        assert_eq!(OrderStatus::Completed.next(), OrderStatus::Completed);
        assert_eq!(OrderStatus::Cancelled.next(), OrderStatus::Cancelled);
    }

    #[test]
    fn parse_roundtrips_every_status() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("Shipped"), None);
    }
}
