//! Catalog queries: the menu-item table behind both the point-of-sale screen
//! and menu management.

use rusqlite::{params, Connection};

use crate::domain::{MenuItem, MenuItemDraft};
use crate::error::CatalogError;

pub fn list_items(conn: &Connection) -> Result<Vec<MenuItem>, CatalogError> {
    let mut stmt =
        conn.prepare("SELECT item_id, name, category, price FROM menu_items ORDER BY item_id")?;
    let rows = stmt.query_map([], |row| {
        Ok(MenuItem {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            price: row.get(3)?,
        })
    })?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row?);
    }
    Ok(items)
}

pub fn create_item(conn: &Connection, draft: &MenuItemDraft) -> Result<i64, CatalogError> {
    draft.validate().map_err(CatalogError::Validation)?;
    conn.execute(
        "INSERT INTO menu_items (name, category, price) VALUES (?1, ?2, ?3)",
        params![draft.name, draft.category, draft.price],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrites name, category, and price of an existing item.
pub fn update_item(conn: &Connection, id: i64, draft: &MenuItemDraft) -> Result<(), CatalogError> {
    draft.validate().map_err(CatalogError::Validation)?;
    let changed = conn.execute(
        "UPDATE menu_items SET name = ?1, category = ?2, price = ?3 WHERE item_id = ?4",
        params![draft.name, draft.category, draft.price, id],
    )?;
    if changed == 0 {
        return Err(CatalogError::NotFound(id));
    }
    Ok(())
}

/// Unconditional removal. Order lines that reference the item keep their
/// frozen subtotals, so history stays displayable.
pub fn delete_item(conn: &Connection, id: i64) -> Result<(), CatalogError> {
    let changed = conn.execute("DELETE FROM menu_items WHERE item_id = ?1", params![id])?;
    if changed == 0 {
        return Err(CatalogError::NotFound(id));
    }
    Ok(())
}
