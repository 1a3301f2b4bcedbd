//! Field rules shared by the browser form and the relay.
//!
//! Both sides call [`validate_field`], so a value the form accepts is a value
//! the relay accepts. Values are trimmed before any rule is applied.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Deliberately loose: one `@`, no whitespace, a dot somewhere in the domain.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Multiline,
}

impl Field {
    /// Every field, in the order the relay checks them.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Email => FieldKind::Email,
            Field::Message => FieldKind::Multiline,
            Field::Name | Field::Subject => FieldKind::Text,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Why a value was rejected. The `Display` text is what the relay reports.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    Required(Field),

    #[error("Invalid email address")]
    InvalidEmail,
}

impl ValidationError {
    /// Text shown inline next to the offending input.
    pub fn inline_message(&self) -> &'static str {
        match self {
            ValidationError::Required(_) => REQUIRED_MESSAGE,
            ValidationError::InvalidEmail => INVALID_EMAIL_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(ValidationError),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(e) => Some(e.inline_message()),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Invalid(e) => Err(e),
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Checks one value against the rules for `field`. Every field is required,
/// and that check runs first, so an empty email field reports "required"
/// rather than "invalid".
pub fn validate_field(field: Field, value: &str) -> Validation {
    let value = value.trim();

    if value.is_empty() {
        return Validation::Invalid(ValidationError::Required(field));
    }

    if field.kind() == FieldKind::Email && !is_valid_email(value) {
        return Validation::Invalid(ValidationError::InvalidEmail);
    }

    Validation::Valid
}
