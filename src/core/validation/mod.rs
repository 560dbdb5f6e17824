//! Validation of address input
//!
//! One declarative constraint table drives both create (strict) and update
//! (partial) validation. Validation never fails loudly: it returns either the
//! typed accepted fields or a field → messages map.

pub mod extractor;
pub mod schema;
pub mod validators;

use std::collections::HashMap;

/// Raw key-value input as submitted by a form
pub type FormFields = HashMap<String, String>;

pub use extractor::FormInput;
pub use schema::{ADDRESS_RULES, FieldRule, Mode, validate_create, validate_update};
