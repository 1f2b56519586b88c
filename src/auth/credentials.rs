//! Shape validation of submitted credentials
//!
//! The login hook receives an arbitrary JSON value. It is turned into a
//! [`ValidatedCredential`] here or rejected before anything touches the store.

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Minimum password length, in UTF-16 code units (the length browsers and
/// JavaScript clients report).
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Why a credential input was refused.
///
/// Variants name the failing field only; they never carry submitted values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("credential input is not an object")]
    NotAnObject,

    #[error("field `{0}` is missing")]
    MissingField(&'static str),

    #[error("field `{0}` is not a string")]
    NotAString(&'static str),

    #[error("email is not a valid address")]
    InvalidEmail,

    #[error("password must be at least {} characters", MIN_PASSWORD_CHARS)]
    PasswordTooShort,
}

/// Password wrapper that keeps the plaintext out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Email/password pair that passed shape validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCredential {
    email: String,
    password: Password,
}

impl ValidatedCredential {
    /// Parse an untyped credential record.
    ///
    /// Expects an object with an `email` string that looks like an address and
    /// a `password` string of at least [`MIN_PASSWORD_CHARS`] UTF-16 units.
    /// Extra fields are ignored.
    pub fn parse(input: &Value) -> Result<Self, ValidationError> {
        let object = input.as_object().ok_or(ValidationError::NotAnObject)?;

        let email = string_field(object, "email")?;
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        let password = string_field(object, "password")?;
        if password.encode_utf16().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError::PasswordTooShort);
        }

        Ok(Self {
            email: email.to_string(),
            password: Password(password.to_string()),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

fn string_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::NotAString(field)),
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
            .expect("email pattern compiles")
    })
}

/// Syntactic address check: dotted domain with an alphabetic TLD, local part
/// without a leading dot or consecutive dots.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && email_pattern().is_match(email)
}
