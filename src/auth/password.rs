//! Password hashing using Argon2
//!
//! New hashes are Argon2id PHC strings. Stored bcrypt hashes (`$2a$`, `$2b$`,
//! `$2y$`) are still accepted for verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("argon2: {0}")]
    Argon2(argon2::password_hash::Error),

    #[error("bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("argon2 parameters: {0}")]
    Params(argon2::Error),
}

impl From<argon2::Error> for HashError {
    fn from(e: argon2::Error) -> Self {
        HashError::Params(e)
    }
}

impl From<argon2::password_hash::Error> for HashError {
    fn from(e: argon2::password_hash::Error) -> Self {
        HashError::Argon2(e)
    }
}

/// One-way adaptive hash used to store and check passwords.
///
/// Comparisons must be constant-time with respect to the stored hash; both
/// implementations here delegate that to the hashing crate.
pub trait SecretHasher: Send + Sync + 'static {
    fn hash(&self, secret: &str) -> Result<String, HashError>;

    /// `Ok(false)` on mismatch, `Err` only when the stored hash is unusable.
    fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool, HashError>;
}

/// Argon2id hasher with default parameters
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Argon2id with explicit cost parameters (memory in KiB, iterations, lanes).
    ///
    /// Only affects newly produced hashes; verification reads the parameters
    /// embedded in the stored hash.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, HashError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl SecretHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(secret.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool, HashError> {
        if is_bcrypt_hash(stored_hash) {
            return Ok(bcrypt::verify(secret, stored_hash)?);
        }

        let parsed_hash = PasswordHash::new(stored_hash)?;
        match self.argon2.verify_password(secret.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn is_bcrypt_hash(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"].iter().any(|p| hash.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("SecurePassword123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("SecurePassword123", &hash).unwrap());
        assert!(!hasher.verify("WrongPassword", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = Argon2Hasher::new();
        let a = hasher.hash("abcdef").unwrap();
        let b = hasher.hash("abcdef").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_custom_params_are_embedded() {
        let hasher = Argon2Hasher::with_params(8, 1, 1).unwrap();
        let hash = hasher.hash("abcdef").unwrap();

        assert!(hash.contains("m=8,t=1,p=1"));
        assert!(Argon2Hasher::new().verify("abcdef", &hash).unwrap());
        assert!(Argon2Hasher::with_params(0, 0, 0).is_err());
    }

    #[test]
    fn test_verify_bcrypt_hash() {
        let hasher = Argon2Hasher::new();
        let hash = bcrypt::hash("abcdef", 4).unwrap();

        assert!(hasher.verify("abcdef", &hash).unwrap());
        assert!(!hasher.verify("wrong12", &hash).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash() {
        let hasher = Argon2Hasher::new();
        assert_matches!(hasher.verify("abcdef", "plaintext"), Err(HashError::Argon2(_)));
        assert_matches!(hasher.verify("abcdef", "$2b$04$short"), Err(HashError::Bcrypt(_)));
    }
}
