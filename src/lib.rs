//! # Credential Gate
//!
//! Email/password login check for web applications.
//!
//! ## Features
//!
//! - **Credential parsing**: untyped submissions become a typed, validated credential or a structured error
//! - **Account lookup**: one parameterised read against a SQLite `users` table
//! - **Hash comparison**: Argon2id, with legacy bcrypt hashes still accepted
//! - **HTTP hook**: `POST /auth/login` built on axum
//!
//! ## Usage
//!
//! ```rust,no_run
//! use credential_gate::auth::{Argon2Hasher, CredentialVerifier, SqliteAccountStore};
//!
//! # async fn run() -> credential_gate::Result<()> {
//! let store = SqliteAccountStore::open("data/accounts.db")?;
//! let verifier = CredentialVerifier::new(store, Argon2Hasher::new())?;
//! let outcome = verifier
//!     .verify(&serde_json::json!({"email": "a@b.com", "password": "abcdef"}))
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Credential validation, account store, hashing and the login route
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Logger setup
pub mod logging;

/// HTTP server
pub mod servers;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use auth::{CredentialVerifier, Verification};
pub use config::GateConfig;
pub use servers::{HttpConfig, HttpServer};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the credential gate
#[derive(Debug, thiserror::Error)]
pub enum CredentialGateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] auth::ValidationError),

    #[error("Authentication error: {0}")]
    Auth(#[from] auth::AuthError),

    #[error("Store error: {0}")]
    Store(#[from] auth::StoreError),

    #[error("Hash error: {0}")]
    Hash(#[from] auth::HashError),

    #[error("Logging error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CredentialGateError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
