//! Field formats checked during validation

use validator::{ValidateEmail, ValidateUrl};

/// Format constraint attached to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Syntactically valid email address
    Email,
    /// Syntactically valid absolute URL; the empty string is accepted
    UrlOrEmpty,
}

impl FieldFormat {
    /// Validate a supplied value against this format
    pub fn validate(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => value.validate_email(),
            FieldFormat::UrlOrEmpty => value.is_empty() || value.validate_url(),
        }
    }

    /// Message reported when [`validate`](Self::validate) fails
    pub fn message(&self) -> &'static str {
        match self {
            FieldFormat::Email => "Invalid email address",
            FieldFormat::UrlOrEmpty => "Invalid url",
        }
    }
}
