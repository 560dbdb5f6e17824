//! Reusable field validators
//!
//! These validators are consulted by the field-constraint table in
//! [`schema`](super::schema) for every supplied field.

use crate::core::address::AddressField;
use crate::core::field::FieldFormat;

/// Validator: field must be present and non-empty
pub fn required(field: AddressField, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(format!("{} is required", field.label())),
    }
}

/// Validator: value must match the given format
pub fn format(format: FieldFormat, value: &str) -> Result<(), String> {
    if format.validate(value) {
        Ok(())
    } else {
        Err(format.message().to_string())
    }
}
