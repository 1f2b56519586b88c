//! Credential verification for the login hook
//!
//! [`CredentialVerifier::verify`] takes the raw submitted record and decides,
//! for one attempt, whether it names an existing account with a matching
//! password. Rejections are values; only infrastructure failures are errors.

use serde_json::Value;
use std::sync::Arc;

use super::credentials::{Password, ValidatedCredential, ValidationError};
use super::database::{AccountStore, StoreError};
use super::models::Account;
use super::password::{HashError, SecretHasher};

/// Hashed once at construction and checked against when no account matches.
const DECOY_SECRET: &str = "credential-gate-decoy";

/// Outcome of one login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Authenticated(Account),
    Rejected(Rejection),
}

impl Verification {
    /// The account on success, `None` for any rejection.
    pub fn into_account(self) -> Option<Account> {
        match self {
            Verification::Authenticated(account) => Some(account),
            Verification::Rejected(_) => None,
        }
    }
}

/// Why an attempt was rejected. Never shown to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("malformed credentials: {0}")]
    Malformed(ValidationError),

    #[error("no account for email")]
    UnknownAccount,

    #[error("password mismatch")]
    SecretMismatch,
}

/// Failures that are not a verdict on the credentials
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("failed to fetch account: {0}")]
    DataAccess(#[from] StoreError),

    #[error("password hash check failed: {0}")]
    Hash(#[from] HashError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct CredentialVerifier<S, H> {
    store: S,
    hasher: Arc<H>,
    decoy_hash: String,
}

impl<S: AccountStore, H: SecretHasher> CredentialVerifier<S, H> {
    pub fn new(store: S, hasher: H) -> Result<Self, HashError> {
        let decoy_hash = hasher.hash(DECOY_SECRET)?;
        Ok(Self {
            store,
            hasher: Arc::new(hasher),
            decoy_hash,
        })
    }

    /// Replace the decoy checked on unknown emails.
    ///
    /// The default decoy uses this hasher's own Argon2 parameters, so a miss
    /// only costs the same as a hit when stored hashes share them. Stores that
    /// hold bcrypt hashes, or Argon2 hashes with other costs, should pass a
    /// hash of the same format and cost here.
    pub fn with_decoy_hash(mut self, decoy_hash: String) -> Self {
        self.decoy_hash = decoy_hash;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check one credential submission.
    ///
    /// Malformed input never reaches the store. A store failure is returned
    /// as [`AuthError::DataAccess`] and is never reported as a rejection.
    pub async fn verify(&self, input: &Value) -> Result<Verification, AuthError> {
        let credential = match ValidatedCredential::parse(input) {
            Ok(credential) => credential,
            Err(e) => return Ok(reject(Rejection::Malformed(e))),
        };

        let account = match self.store.find_account_by_email(credential.email()).await {
            Ok(account) => account,
            Err(e) => {
                log::error!("Failed to fetch account: {}", e);
                return Err(e.into());
            }
        };

        let Some(account) = account else {
            // same hashing cost as a known email
            if let Err(e) = self
                .check_password(credential.password().clone(), self.decoy_hash.clone())
                .await
            {
                log::warn!("Decoy hash check failed: {}", e);
            }
            return Ok(reject(Rejection::UnknownAccount));
        };

        let matched = match self
            .check_password(credential.password().clone(), account.password_hash.clone())
            .await
        {
            Ok(matched) => matched,
            Err(e) => {
                log::error!("Password check failed for account {}: {}", account.id, e);
                return Err(e);
            }
        };

        if matched {
            log::debug!("Credentials accepted for account {}", account.id);
            Ok(Verification::Authenticated(account))
        } else {
            Ok(reject(Rejection::SecretMismatch))
        }
    }

    async fn check_password(&self, password: Password, stored_hash: String) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        let matched =
            tokio::task::spawn_blocking(move || hasher.verify(password.expose(), &stored_hash))
                .await??;
        Ok(matched)
    }
}

fn reject(reason: Rejection) -> Verification {
    log::info!("Invalid credentials");
    log::debug!("Credential check rejected: {}", reason);
    Verification::Rejected(reason)
}
