//! SQLite-backed storage shared by every service.
//!
//! All statements are parameterized; the multi-row writes (`orders::place_order`,
//! `accounts::register`) run inside a single transaction so a failure part-way
//! through never leaves orphan rows.

pub mod accounts;
pub mod catalog;
pub mod orders;
mod schema;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::Connection;

use crate::error::AccountError;

/// Cloneable handle to the single shared connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (creating if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> rusqlite::Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> rusqlite::Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> rusqlite::Result<Self> {
        schema::init(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Locks the shared connection. Recovers the guard even if a previous
    /// caller panicked while holding it; the connection stays usable.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an admin account. Admins are provisioned out-of-band, never
    /// through self-service registration.
    pub fn provision_admin(&self, username: &str, password: &str) -> Result<i64, AccountError> {
        accounts::provision_admin(&self.conn(), username, password)
    }
}
