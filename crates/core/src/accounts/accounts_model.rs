//! Account domain models.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a registered user account.
///
/// Created once at registration and read-only afterwards. The credential
/// hash is skipped during serialization so API responses stay sanitized.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new account.
///
/// `password_hash` is produced by the auth layer before this struct is
/// handed to the service; the core never sees a plaintext password.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.username.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "username".to_string(),
            )));
        }
        if self.password_hash.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "password".to_string(),
            )));
        }
        if !is_valid_email(&self.email) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "'{}' is not a valid email address",
                self.email
            ))));
        }
        Ok(())
    }

    /// Returns the email normalized the way it is stored and looked up.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Checks the basic shape of an email address.
///
/// One `@`, a non-empty local part, and a dotted domain is enough here;
/// deliverability is the mail system's problem.
pub fn is_valid_email(email: &str) -> bool {
    let re = EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));
    re.is_match(email.trim())
}
