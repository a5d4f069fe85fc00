//! Order workflow queries: transactional checkout, the status cycle, and the
//! join queries behind order history and the sales report.

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{ItemSales, OrderLine, OrderReceipt, OrderStatus, OrderSummary};
use crate::error::OrderError;

/// Places an order: one header, one row per line, exactly one payment, all in
/// a single transaction. Unit prices are read at the moment of sale and each
/// line's subtotal is frozen, so later catalog edits never rewrite history.
pub fn place_order(
    conn: &mut Connection,
    customer_id: i64,
    lines: &[OrderLine],
    amount_paid: f64,
) -> Result<OrderReceipt, OrderError> {
    if lines.is_empty() {
        return Err(OrderError::Validation("order has no line items".to_string()));
    }
    if let Some(line) = lines.iter().find(|line| line.quantity < 1) {
        return Err(OrderError::Validation(format!(
            "quantity must be at least 1 for item {}",
            line.item_id
        )));
    }

    let tx = conn.transaction()?;

    let mut total = 0.0;
    let mut priced = Vec::with_capacity(lines.len());
    for line in lines {
        let price: f64 = tx
            .query_row(
                "SELECT price FROM menu_items WHERE item_id = ?1",
                params![line.item_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(OrderError::UnknownItem(line.item_id))?;
        let subtotal = price * f64::from(line.quantity);
        total += subtotal;
        priced.push((line, subtotal));
    }

    if amount_paid < total {
        return Err(OrderError::InsufficientPayment {
            required: total,
            offered: amount_paid,
        });
    }
    let change = amount_paid - total;

    tx.execute(
        "INSERT INTO orders (customer_id, status, total_amount) VALUES (?1, ?2, ?3)",
        params![customer_id, OrderStatus::Pending.as_str(), total],
    )?;
    let order_id = tx.last_insert_rowid();

    for (line, subtotal) in &priced {
        tx.execute(
            "INSERT INTO order_items (order_id, item_id, quantity, subtotal) VALUES (?1, ?2, ?3, ?4)",
            params![order_id, line.item_id, line.quantity, subtotal],
        )?;
    }

    tx.execute(
        "INSERT INTO payments (order_id, amount_paid, change_amount) VALUES (?1, ?2, ?3)",
        params![order_id, amount_paid, change],
    )?;

    tx.commit()?;
    Ok(OrderReceipt {
        order_id,
        total,
        change,
    })
}

/// Applies the forward-only transition table to one order and returns the new
/// status. Terminal statuses are left untouched.
pub fn advance_status(conn: &mut Connection, order_id: i64) -> Result<OrderStatus, OrderError> {
    let tx = conn.transaction()?;

    let raw: String = tx
        .query_row(
            "SELECT status FROM orders WHERE order_id = ?1",
            params![order_id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or(OrderError::NotFound(order_id))?;
    let current = OrderStatus::parse(&raw)
        .ok_or_else(|| OrderError::Storage(format!("order {order_id} has unknown status {raw:?}")))?;

    let next = current.next();
    if next != current {
        tx.execute(
            "UPDATE orders SET status = ?1 WHERE order_id = ?2",
            params![next.as_str(), order_id],
        )?;
    }

    tx.commit()?;
    Ok(next)
}

const SUMMARY_SELECT: &str = "
    SELECT o.order_id, c.name, o.order_date, o.status, o.total_amount,
           p.payment_method, p.amount_paid, p.change_amount,
           group_concat(COALESCE(m.name, 'item #' || oi.item_id) || ' x' || oi.quantity, ', ')
    FROM orders o
    JOIN customers c ON c.customer_id = o.customer_id
    JOIN order_items oi ON oi.order_id = o.order_id
    LEFT JOIN menu_items m ON m.item_id = oi.item_id
    LEFT JOIN payments p ON p.order_id = o.order_id";

const SUMMARY_TAIL: &str = "
    GROUP BY o.order_id
    ORDER BY o.order_date DESC, o.order_id DESC";

fn summary_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<OrderSummary> {
    let raw_status: String = row.get(3)?;
    let status = OrderStatus::parse(&raw_status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            format!("unknown order status {raw_status:?}").into(),
        )
    })?;
    Ok(OrderSummary {
        order_id: row.get(0)?,
        customer_name: row.get(1)?,
        order_date: row.get(2)?,
        status,
        total_amount: row.get(4)?,
        payment_method: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        amount_paid: row.get::<_, Option<f64>>(6)?.unwrap_or_default(),
        change_amount: row.get::<_, Option<f64>>(7)?.unwrap_or_default(),
        items: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
    })
}

/// One customer's order history, newest first.
pub fn orders_for_customer(
    conn: &Connection,
    customer_id: i64,
) -> Result<Vec<OrderSummary>, OrderError> {
    let sql = format!("{SUMMARY_SELECT} WHERE o.customer_id = ?1 {SUMMARY_TAIL}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![customer_id], summary_from_row)?;

    let mut summaries = Vec::new();
    for row in rows {
        summaries.push(row?);
    }
    Ok(summaries)
}

/// Every order in the system, newest first, for administrative review.
pub fn all_orders(conn: &Connection) -> Result<Vec<OrderSummary>, OrderError> {
    let sql = format!("{SUMMARY_SELECT} {SUMMARY_TAIL}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], summary_from_row)?;

    let mut summaries = Vec::new();
    for row in rows {
        summaries.push(row?);
    }
    Ok(summaries)
}

/// Revenue per item name across non-cancelled orders, highest first. Summed
/// from the frozen line subtotals, not the live menu prices.
pub fn sales_by_item(conn: &Connection) -> Result<Vec<ItemSales>, OrderError> {
    let mut stmt = conn.prepare(
        "SELECT COALESCE(m.name, 'item #' || oi.item_id) AS item, SUM(oi.subtotal) AS revenue
         FROM order_items oi
         JOIN orders o ON o.order_id = oi.order_id
         LEFT JOIN menu_items m ON m.item_id = oi.item_id
         WHERE o.status != ?1
         GROUP BY item
         ORDER BY revenue DESC",
    )?;
    let rows = stmt.query_map(params![OrderStatus::Cancelled.as_str()], |row| {
        Ok(ItemSales {
            name: row.get(0)?,
            revenue: row.get(1)?,
        })
    })?;

    let mut sales = Vec::new();
    for row in rows {
        sales.push(row?);
    }
    Ok(sales)
}

/// Cancelled never comes out of the workflow itself; tests set it directly to
/// exercise the paths that must tolerate it.
#[cfg(test)]
pub(crate) fn set_status_for_test(
    conn: &Connection,
    order_id: i64,
    status: OrderStatus,
) -> Result<(), OrderError> {
    conn.execute(
        "UPDATE orders SET status = ?1 WHERE order_id = ?2",
        params![status.as_str(), order_id],
    )?;
    Ok(())
}
