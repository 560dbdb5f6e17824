//! The Address entity and its field set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted address contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub salutation: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    pub email: String,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub keywords: Option<String>,
    pub search_terms: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Address {
    /// Build a fresh record from validated create input
    ///
    /// Assigns a new id and stamps both timestamps with the current time.
    pub fn new(input: NewAddress) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            salutation: input.salutation,
            first_name: input.first_name,
            last_name: input.last_name,
            company: input.company,
            street: input.street,
            house_number: input.house_number,
            postal_code: input.postal_code,
            city: input.city,
            country: input.country,
            email: input.email,
            phone: input.phone,
            mobile: input.mobile,
            keywords: input.keywords,
            search_terms: input.search_terms,
            profile_image: input.profile_image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Read a field as a string slice, `None` when an optional field is unset
    pub fn field(&self, field: AddressField) -> Option<&str> {
        match field {
            AddressField::Salutation => self.salutation.as_deref(),
            AddressField::FirstName => Some(&self.first_name),
            AddressField::LastName => Some(&self.last_name),
            AddressField::Company => self.company.as_deref(),
            AddressField::Street => Some(&self.street),
            AddressField::HouseNumber => Some(&self.house_number),
            AddressField::PostalCode => Some(&self.postal_code),
            AddressField::City => Some(&self.city),
            AddressField::Country => Some(&self.country),
            AddressField::Email => Some(&self.email),
            AddressField::Phone => self.phone.as_deref(),
            AddressField::Mobile => self.mobile.as_deref(),
            AddressField::Keywords => self.keywords.as_deref(),
            AddressField::SearchTerms => self.search_terms.as_deref(),
            AddressField::ProfileImage => self.profile_image.as_deref(),
        }
    }

    /// Apply a validated partial update
    ///
    /// Only fields present in the patch are written. `updated_at` is refreshed
    /// even when the patch is empty.
    pub fn apply(&mut self, patch: AddressPatch) {
        if let Some(v) = patch.salutation {
            self.salutation = v;
        }
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.company {
            self.company = v;
        }
        if let Some(v) = patch.street {
            self.street = v;
        }
        if let Some(v) = patch.house_number {
            self.house_number = v;
        }
        if let Some(v) = patch.postal_code {
            self.postal_code = v;
        }
        if let Some(v) = patch.city {
            self.city = v;
        }
        if let Some(v) = patch.country {
            self.country = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.mobile {
            self.mobile = v;
        }
        if let Some(v) = patch.keywords {
            self.keywords = v;
        }
        if let Some(v) = patch.search_terms {
            self.search_terms = v;
        }
        if let Some(v) = patch.profile_image {
            self.profile_image = v;
        }
        self.updated_at = Utc::now();
    }
}

/// Validated input for creating an address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAddress {
    pub salutation: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    pub email: String,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub keywords: Option<String>,
    pub search_terms: Option<String>,
    pub profile_image: Option<String>,
}

/// Validated partial update
///
/// The outer `Option` says whether the field was supplied. For optional
/// fields the inner `Option` is `None` when the caller cleared the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPatch {
    pub salutation: Option<Option<String>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<Option<String>>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub mobile: Option<Option<String>>,
    pub keywords: Option<Option<String>>,
    pub search_terms: Option<Option<String>>,
    pub profile_image: Option<Option<String>>,
}

impl AddressPatch {
    /// Whether no field was supplied
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Every input field of an address, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Salutation,
    FirstName,
    LastName,
    Company,
    Street,
    HouseNumber,
    PostalCode,
    City,
    Country,
    Email,
    Phone,
    Mobile,
    Keywords,
    SearchTerms,
    ProfileImage,
}

impl AddressField {
    pub const ALL: [AddressField; 15] = [
        AddressField::Salutation,
        AddressField::FirstName,
        AddressField::LastName,
        AddressField::Company,
        AddressField::Street,
        AddressField::HouseNumber,
        AddressField::PostalCode,
        AddressField::City,
        AddressField::Country,
        AddressField::Email,
        AddressField::Phone,
        AddressField::Mobile,
        AddressField::Keywords,
        AddressField::SearchTerms,
        AddressField::ProfileImage,
    ];

    /// Fields a free-text search is matched against
    pub const SEARCHABLE: [AddressField; 10] = [
        AddressField::FirstName,
        AddressField::LastName,
        AddressField::Company,
        AddressField::Street,
        AddressField::City,
        AddressField::PostalCode,
        AddressField::Country,
        AddressField::Email,
        AddressField::Keywords,
        AddressField::SearchTerms,
    ];

    /// Wire name of the field (form key and JSON key)
    pub fn name(self) -> &'static str {
        match self {
            AddressField::Salutation => "salutation",
            AddressField::FirstName => "firstName",
            AddressField::LastName => "lastName",
            AddressField::Company => "company",
            AddressField::Street => "street",
            AddressField::HouseNumber => "houseNumber",
            AddressField::PostalCode => "postalCode",
            AddressField::City => "city",
            AddressField::Country => "country",
            AddressField::Email => "email",
            AddressField::Phone => "phone",
            AddressField::Mobile => "mobile",
            AddressField::Keywords => "keywords",
            AddressField::SearchTerms => "searchTerms",
            AddressField::ProfileImage => "profileImage",
        }
    }

    /// Human-readable label used in messages and CSV headers
    pub fn label(self) -> &'static str {
        match self {
            AddressField::Salutation => "Salutation",
            AddressField::FirstName => "First name",
            AddressField::LastName => "Last name",
            AddressField::Company => "Company",
            AddressField::Street => "Street",
            AddressField::HouseNumber => "House number",
            AddressField::PostalCode => "Postal code",
            AddressField::City => "City",
            AddressField::Country => "Country",
            AddressField::Email => "Email",
            AddressField::Phone => "Phone",
            AddressField::Mobile => "Mobile",
            AddressField::Keywords => "Keywords",
            AddressField::SearchTerms => "Search terms",
            AddressField::ProfileImage => "Profile image",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}
