//! CSV rendering of address records
//!
//! Pure formatting: the caller decides which records are exported and in
//! which order.

use std::borrow::Cow;

use crate::core::address::{Address, AddressField};

/// Exported columns, in order
pub const CSV_COLUMNS: [(&str, AddressField); 12] = [
    ("Salutation", AddressField::Salutation),
    ("First Name", AddressField::FirstName),
    ("Last Name", AddressField::LastName),
    ("Company", AddressField::Company),
    ("Street", AddressField::Street),
    ("House Number", AddressField::HouseNumber),
    ("City", AddressField::City),
    ("Postal Code", AddressField::PostalCode),
    ("Country", AddressField::Country),
    ("Email", AddressField::Email),
    ("Phone", AddressField::Phone),
    ("Mobile", AddressField::Mobile),
];

/// Quote a value when it contains a delimiter, quote or line break
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render records as CSV text
///
/// The header row comes first, then one row per record. Rows are separated
/// by `\n` with no trailing newline. Absent values render empty.
pub fn format_addresses(addresses: &[Address]) -> String {
    let header: Vec<&str> = CSV_COLUMNS.iter().map(|(title, _)| *title).collect();
    let mut csv = header.join(",");

    for address in addresses {
        csv.push('\n');
        for (i, (_, field)) in CSV_COLUMNS.iter().enumerate() {
            if i > 0 {
                csv.push(',');
            }
            let value = address.field(*field).unwrap_or_default();
            csv.push_str(&escape_field(value));
        }
    }

    csv
}
