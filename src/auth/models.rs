//! Authentication data models

use serde::Serialize;
use std::fmt;

/// Account row as stored in the `users` table.
///
/// The hash is never serialized and never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

impl Account {
    pub fn new(name: &str, email: &str, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Body returned by `POST /auth/login` on success
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub account: Account,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
