//! Account and customer-profile queries. Registration is the one multi-row
//! write here; its uniqueness checks run inside the same transaction that
//! inserts, so a duplicate leaves no partial rows.

use rusqlite::{params, Connection, OptionalExtension};

use crate::auth;
use crate::domain::{CustomerProfile, Registration, Role, Session};
use crate::error::AccountError;

/// Creates an account (role customer) and its linked profile atomically.
pub fn register(conn: &mut Connection, registration: &Registration) -> Result<i64, AccountError> {
    registration.validate().map_err(AccountError::Validation)?;

    let tx = conn.transaction()?;

    let username_taken: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM accounts WHERE username = ?1)",
        params![registration.username],
        |row| row.get(0),
    )?;
    if username_taken {
        return Err(AccountError::DuplicateUsername(registration.username.clone()));
    }

    let email_taken: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM customers WHERE email = ?1)",
        params![registration.email],
        |row| row.get(0),
    )?;
    if email_taken {
        return Err(AccountError::DuplicateEmail(registration.email.clone()));
    }

    let hash = auth::hash_password(&registration.password).map_err(AccountError::Storage)?;
    tx.execute(
        "INSERT INTO accounts (username, password_hash, role) VALUES (?1, ?2, ?3)",
        params![registration.username, hash, Role::Customer.as_str()],
    )?;
    let account_id = tx.last_insert_rowid();

    tx.execute(
        "INSERT INTO customers (account_id, name, email, phone, address) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            account_id,
            registration.full_name,
            registration.email,
            registration.phone,
            registration.address
        ],
    )?;

    tx.commit()?;
    Ok(account_id)
}

/// Resolves a credential pair to an account, its role, and (for customers)
/// the linked profile. Unknown usernames and failed verifications come back
/// as the same credential error.
pub fn authenticate(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<Session, AccountError> {
    let row = conn
        .query_row(
            "SELECT account_id, password_hash, role FROM accounts WHERE username = ?1",
            params![username],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    let (account_id, stored_hash, raw_role) = row.ok_or(AccountError::InvalidCredentials)?;
    if !auth::verify_password(password, &stored_hash).map_err(AccountError::Storage)? {
        return Err(AccountError::InvalidCredentials);
    }

    let role = Role::parse(&raw_role).ok_or_else(|| {
        AccountError::Storage(format!("account {account_id} has unknown role {raw_role:?}"))
    })?;

    let profile = match role {
        Role::Customer => Some(customer_by_account(conn, account_id)?.ok_or_else(|| {
            AccountError::Storage(format!("customer account {account_id} has no profile"))
        })?),
        Role::Admin => None,
    };

    Ok(Session {
        account_id,
        role,
        profile,
    })
}

pub fn customer_by_account(
    conn: &Connection,
    account_id: i64,
) -> Result<Option<CustomerProfile>, AccountError> {
    customer_where(conn, "account_id", account_id)
}

pub fn customer_by_id(
    conn: &Connection,
    customer_id: i64,
) -> Result<Option<CustomerProfile>, AccountError> {
    customer_where(conn, "customer_id", customer_id)
}

fn customer_where(
    conn: &Connection,
    key_column: &str,
    key: i64,
) -> Result<Option<CustomerProfile>, AccountError> {
    // key_column is one of two fixed identifiers above, never caller input.
    let sql = format!(
        "SELECT customer_id, account_id, name, email, phone, address FROM customers WHERE {key_column} = ?1"
    );
    conn.query_row(&sql, params![key], |row| {
        Ok(CustomerProfile {
            customer_id: row.get(0)?,
            account_id: row.get(1)?,
            name: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
            address: row.get(5)?,
        })
    })
    .optional()
    .map_err(Into::into)
}

/// Inserts an admin account directly. No profile row; admins are not
/// customers.
pub fn provision_admin(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<i64, AccountError> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(AccountError::Validation(
            "username and password must not be blank".to_string(),
        ));
    }

    let username_taken: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM accounts WHERE username = ?1)",
        params![username],
        |row| row.get(0),
    )?;
    if username_taken {
        return Err(AccountError::DuplicateUsername(username.to_string()));
    }

    let hash = auth::hash_password(password).map_err(AccountError::Storage)?;
    conn.execute(
        "INSERT INTO accounts (username, password_hash, role) VALUES (?1, ?2, ?3)",
        params![username, hash, Role::Admin.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;

    fn registration(username: &str, email: &str) -> Registration {
        Registration {
            username: username.to_string(),
            password: "correct horse".to_string(),
            full_name: "Alice Santos".to_string(),
            email: email.to_string(),
            phone: "0917 555 0101".to_string(),
            address: "14 Mabini St".to_string(),
        }
    }

    #[test]
    fn register_then_authenticate() {
        let db = Database::in_memory().unwrap();
        let mut conn = db.conn();

        let account_id = register(&mut conn, &registration("alice", "alice@example.com")).unwrap();
        let session = authenticate(&conn, "alice", "correct horse").unwrap();

        assert_eq!(session.account_id, account_id);
        assert_eq!(session.role, Role::Customer);
        let profile = session.profile.expect("customer session carries a profile");
        assert_eq!(profile.account_id, account_id);
        assert_eq!(profile.name, "Alice Santos");
        assert_eq!(profile.email, "alice@example.com");
        assert_eq!(profile.phone, "0917 555 0101");
        assert_eq!(profile.address, "14 Mabini St");
    }

    #[test]
    fn bad_credentials_are_indistinguishable() {
        let db = Database::in_memory().unwrap();
        let mut conn = db.conn();
        register(&mut conn, &registration("alice", "alice@example.com")).unwrap();

        assert_eq!(
            authenticate(&conn, "alice", "wrong horse"),
            Err(AccountError::InvalidCredentials)
        );
        assert_eq!(
            authenticate(&conn, "nobody", "correct horse"),
            Err(AccountError::InvalidCredentials)
        );
    }

    #[test]
    fn passwords_are_stored_hashed() {
        let db = Database::in_memory().unwrap();
        let mut conn = db.conn();
        register(&mut conn, &registration("alice", "alice@example.com")).unwrap();

        let stored: String = conn
            .query_row(
                "SELECT password_hash FROM accounts WHERE username = 'alice'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_ne!(stored, "correct horse");
        assert!(stored.starts_with("$argon2"));
    }

    #[test]
    fn duplicate_username_leaves_no_partial_rows() {
        let db = Database::in_memory().unwrap();
        let mut conn = db.conn();
        register(&mut conn, &registration("alice", "alice@example.com")).unwrap();

        assert_eq!(
            register(&mut conn, &registration("alice", "other@example.com")),
            Err(AccountError::DuplicateUsername("alice".to_string()))
        );

        // The rejected registration's email never landed, so it is still free.
        register(&mut conn, &registration("alicia", "other@example.com")).unwrap();
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let db = Database::in_memory().unwrap();
        let mut conn = db.conn();
        register(&mut conn, &registration("alice", "alice@example.com")).unwrap();

        assert_eq!(
            register(&mut conn, &registration("bob", "alice@example.com")),
            Err(AccountError::DuplicateEmail("alice@example.com".to_string()))
        );
    }

    #[test]
    fn blank_fields_never_reach_the_tables() {
        let db = Database::in_memory().unwrap();
        let mut conn = db.conn();

        let mut reg = registration("alice", "alice@example.com");
        reg.address = "  ".to_string();
        assert!(matches!(
            register(&mut conn, &reg),
            Err(AccountError::Validation(_))
        ));

        let accounts: i64 = conn
            .query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
            .unwrap();
        assert_eq!(accounts, 0);
    }

    #[test]
    fn provisioned_admins_authenticate_without_a_profile() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn();

        provision_admin(&conn, "admin", "kusina-admin").unwrap();
        let session = authenticate(&conn, "admin", "kusina-admin").unwrap();

        assert_eq!(session.role, Role::Admin);
        assert!(session.profile.is_none());

        assert_eq!(
            provision_admin(&conn, "admin", "again"),
            Err(AccountError::DuplicateUsername("admin".to_string()))
        );
    }

    #[test]
    fn customer_lookup_by_id() {
        let db = Database::in_memory().unwrap();
        let mut conn = db.conn();
        let account_id = register(&mut conn, &registration("alice", "alice@example.com")).unwrap();
        let profile = customer_by_account(&conn, account_id).unwrap().unwrap();

        let by_id = customer_by_id(&conn, profile.customer_id).unwrap().unwrap();
        assert_eq!(by_id, profile);
        assert!(customer_by_id(&conn, 999).unwrap().is_none());
    }
}
