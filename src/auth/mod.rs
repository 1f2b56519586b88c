//! Authentication module
//!
//! Email/password credential checking:
//! - Shape validation of the submitted record
//! - Account lookup by email in SQLite
//! - Argon2 (and legacy bcrypt) hash comparison
//! - `POST /auth/login` hook for the web layer

pub mod credentials;
pub mod database;
pub mod models;
pub mod password;
pub mod routes;
pub mod verifier;

pub use credentials::{ValidatedCredential, ValidationError, MIN_PASSWORD_CHARS};
pub use database::{AccountStore, SqliteAccountStore, StoreError};
pub use models::*;
pub use password::{Argon2Hasher, HashError, SecretHasher};
pub use routes::{auth_router, AuthState};
pub use verifier::{AuthError, CredentialVerifier, Rejection, Verification};
