use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EmailError {
    #[error("email address must contain '@'")]
    MissingAtSign,

    #[error("email address is empty")]
    Empty,
}

/// A validated email address.
///
/// Validation is deliberately shallow (non-empty, contains `@`): the store
/// is the system of record and deeper RFC validation buys nothing here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse a raw string into an address.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` when the trimmed input is empty or has no `@`.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if !trimmed.contains('@') {
            return Err(EmailError::MissingAtSign);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact fields as they are written on first creation.
///
/// Name and company stay blank placeholders until enrichment happens
/// elsewhere; only the email key matters to the quick check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
}

impl NewContact {
    /// A contact carrying only its email key.
    #[must_use]
    pub fn from_email(email: EmailAddress, created_at: DateTime<Utc>) -> Self {
        Self {
            email,
            first_name: String::new(),
            last_name: String::new(),
            company_name: String::new(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn accepts_plain_address_and_trims() {
        let email = EmailAddress::parse("  you@company.com ").unwrap();
        assert_eq!(email.as_str(), "you@company.com");
    }

    #[test]
    fn rejects_address_without_at_sign() {
        let err = EmailAddress::parse("not-an-email").unwrap_err();
        assert_eq!(err, EmailError::MissingAtSign);
    }

    #[test]
    fn rejects_empty_address() {
        assert_eq!(EmailAddress::parse("   ").unwrap_err(), EmailError::Empty);
    }

    #[test]
    fn new_contact_defaults_to_blank_names() {
        let email = EmailAddress::parse("you@company.com").unwrap();
        let contact = NewContact::from_email(email, fixed_now());
        assert!(contact.first_name.is_empty());
        assert!(contact.company_name.is_empty());
    }
}
