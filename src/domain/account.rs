use std::fmt;

use serde::Serialize;

/// Coarse permission flag distinguishing catalog/order management from
/// self-service ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }

    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "admin" => Some(Role::Admin),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer profile linked one-to-one with an account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerProfile {
    pub customer_id: i64,
    pub account_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Authenticated identity handed back to the presentation layer.
/// Customers carry their linked profile; admins have none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub account_id: i64,
    pub role: Role,
    pub profile: Option<CustomerProfile>,
}

/// Payload for self-service registration. The password arrives here already
/// confirmed by the caller; the confirmation field never reaches the core.
#[derive(Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("username", &self.username),
            ("password", &self.password),
            ("full name", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{field} must not be blank"));
            }
        }
        Ok(())
    }
}

// Registrations travel through instrumented calls; keep the password out of
// any recorded output.
impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("address", &self.address)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            username: "alice".to_string(),
            password: "correct horse".to_string(),
            full_name: "Alice Santos".to_string(),
            email: "alice@example.com".to_string(),
            phone: "0917 555 0101".to_string(),
            address: "14 Mabini St".to_string(),
        }
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(registration().validate().is_ok());

        let mut reg = registration();
        reg.email = "   ".to_string();
        assert!(reg.validate().is_err());

        let mut reg = registration();
        reg.password = String::new();
        assert!(reg.validate().is_err());
    }

    #[test]
    fn debug_output_never_contains_the_password() {
        let rendered = format!("{:?}", registration());
        assert!(!rendered.contains("correct horse"));
        assert!(rendered.contains("<redacted>"));
    }
}
