use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Letters and whitespace only; an empty name never matches.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("name pattern is valid"));

/// local@domain.tld with a 2-6 letter top-level domain.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,6}$")
        .expect("email pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerError {
    #[error("Invalid name. No numbers or special characters allowed.")]
    InvalidName,
    #[error("Invalid email. Please enter a valid address.")]
    InvalidEmail,
}

/**
 * Who the session belongs to. Collected once at startup and immutable
 * from then on; the active account holds its own copy.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    name: String,
    email: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Customer {
        Customer {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

pub fn validate_name(name: &str) -> Result<(), CustomerError> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(CustomerError::InvalidName)
    }
}

pub fn validate_email(email: &str) -> Result<(), CustomerError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(CustomerError::InvalidEmail)
    }
}
