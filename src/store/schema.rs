use rusqlite::Connection;

/// Creates every table this service touches. Safe to run on each startup.
///
/// `order_items.item_id` deliberately carries no foreign key: catalog
/// deletions are unconditional and must never touch order history. Each line
/// freezes its subtotal at the moment of sale instead of re-deriving it from
/// the live menu price.
pub(super) fn init(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS accounts (
            account_id    INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role          TEXT NOT NULL DEFAULT 'customer'
        );

        CREATE TABLE IF NOT EXISTS customers (
            customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id  INTEGER NOT NULL UNIQUE REFERENCES accounts(account_id),
            name        TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            phone       TEXT NOT NULL,
            address     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS menu_items (
            item_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            name     TEXT NOT NULL,
            category TEXT NOT NULL,
            price    REAL NOT NULL CHECK (price >= 0)
        );

        CREATE TABLE IF NOT EXISTS orders (
            order_id     INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id  INTEGER NOT NULL REFERENCES customers(customer_id),
            order_date   TEXT NOT NULL DEFAULT (datetime('now')),
            status       TEXT NOT NULL DEFAULT 'Pending',
            total_amount REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS order_items (
            order_id INTEGER NOT NULL REFERENCES orders(order_id),
            item_id  INTEGER NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity >= 1),
            subtotal REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS payments (
            order_id       INTEGER NOT NULL UNIQUE REFERENCES orders(order_id),
            payment_method TEXT NOT NULL DEFAULT 'Cash',
            amount_paid    REAL NOT NULL,
            change_amount  REAL NOT NULL
        );",
    )
}
