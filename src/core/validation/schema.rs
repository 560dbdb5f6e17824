//! Field-constraint table for the Address entity
//!
//! A single table describes every field. It is consulted in two modes:
//! [`Mode::Strict`] for creation, where required fields must be supplied, and
//! [`Mode::Partial`] for updates, where only supplied fields are checked.

use super::FormFields;
use super::validators;
use crate::core::address::{AddressField, AddressPatch, NewAddress};
use crate::core::error::FieldErrors;
use crate::core::field::FieldFormat;

/// Constraint on a single field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: AddressField,
    pub required: bool,
    pub format: Option<FieldFormat>,
}

impl FieldRule {
    const fn optional(field: AddressField) -> Self {
        Self {
            field,
            required: false,
            format: None,
        }
    }

    const fn required(field: AddressField) -> Self {
        Self {
            field,
            required: true,
            format: None,
        }
    }

    const fn with_format(self, format: FieldFormat) -> Self {
        Self {
            format: Some(format),
            ..self
        }
    }

    /// Messages for a single value, empty when the value passes
    fn check(&self, value: Option<&str>, mode: Mode) -> Vec<String> {
        let Some(value) = value else {
            return match mode {
                Mode::Strict if self.required => validators::required(self.field, None)
                    .err()
                    .into_iter()
                    .collect(),
                _ => Vec::new(),
            };
        };

        let mut messages = Vec::new();
        match self.format {
            // A present value is judged by its format alone
            Some(format) => {
                if let Err(msg) = validators::format(format, value) {
                    messages.push(msg);
                }
            }
            None if self.required => {
                if let Err(msg) = validators::required(self.field, Some(value)) {
                    messages.push(msg);
                }
            }
            None => {}
        }
        messages
    }
}

/// The constraint table, in form order
pub const ADDRESS_RULES: [FieldRule; 15] = [
    FieldRule::optional(AddressField::Salutation),
    FieldRule::required(AddressField::FirstName),
    FieldRule::required(AddressField::LastName),
    FieldRule::optional(AddressField::Company),
    FieldRule::required(AddressField::Street),
    FieldRule::required(AddressField::HouseNumber),
    FieldRule::required(AddressField::PostalCode),
    FieldRule::required(AddressField::City),
    FieldRule::required(AddressField::Country),
    FieldRule::optional(AddressField::Phone),
    FieldRule::required(AddressField::Email).with_format(FieldFormat::Email),
    FieldRule::optional(AddressField::Mobile),
    FieldRule::optional(AddressField::Keywords),
    FieldRule::optional(AddressField::SearchTerms),
    FieldRule::optional(AddressField::ProfileImage).with_format(FieldFormat::UrlOrEmpty),
];

/// How absent fields are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every required field must be supplied
    Strict,
    /// Every field is optional; supplied fields are still checked
    Partial,
}

/// Check raw input against the table
///
/// Keys that are not address fields are ignored.
pub fn check(raw: &FormFields, mode: Mode) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for rule in &ADDRESS_RULES {
        let value = raw.get(rule.field.name()).map(String::as_str);
        let messages = rule.check(value, mode);
        if !messages.is_empty() {
            errors.insert(rule.field.name().to_string(), messages);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate create input in strict mode
pub fn validate_create(raw: &FormFields) -> Result<NewAddress, FieldErrors> {
    check(raw, Mode::Strict)?;

    let value = |f: AddressField| raw.get(f.name()).cloned().unwrap_or_default();
    let optional = |f: AddressField| raw.get(f.name()).filter(|v| !v.is_empty()).cloned();

    Ok(NewAddress {
        salutation: optional(AddressField::Salutation),
        first_name: value(AddressField::FirstName),
        last_name: value(AddressField::LastName),
        company: optional(AddressField::Company),
        street: value(AddressField::Street),
        house_number: value(AddressField::HouseNumber),
        postal_code: value(AddressField::PostalCode),
        city: value(AddressField::City),
        country: value(AddressField::Country),
        email: value(AddressField::Email),
        phone: optional(AddressField::Phone),
        mobile: optional(AddressField::Mobile),
        keywords: optional(AddressField::Keywords),
        search_terms: optional(AddressField::SearchTerms),
        profile_image: optional(AddressField::ProfileImage),
    })
}

/// Validate update input in partial mode
///
/// Supplied optional fields with an empty value clear the stored value.
pub fn validate_update(raw: &FormFields) -> Result<AddressPatch, FieldErrors> {
    check(raw, Mode::Partial)?;

    let value = |f: AddressField| raw.get(f.name()).cloned();
    let optional = |f: AddressField| {
        raw.get(f.name())
            .map(|v| if v.is_empty() { None } else { Some(v.clone()) })
    };

    Ok(AddressPatch {
        salutation: optional(AddressField::Salutation),
        first_name: value(AddressField::FirstName),
        last_name: value(AddressField::LastName),
        company: optional(AddressField::Company),
        street: value(AddressField::Street),
        house_number: value(AddressField::HouseNumber),
        postal_code: value(AddressField::PostalCode),
        city: value(AddressField::City),
        country: value(AddressField::Country),
        email: value(AddressField::Email),
        phone: optional(AddressField::Phone),
        mobile: optional(AddressField::Mobile),
        keywords: optional(AddressField::Keywords),
        search_terms: optional(AddressField::SearchTerms),
        profile_image: optional(AddressField::ProfileImage),
    })
}
