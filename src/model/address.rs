//! Postal address used for shipping and, optionally, billing.

use super::field::AddressField;
use serde::{Deserialize, Serialize};

/// A postal address as typed into the checkout form.
///
/// All fields are free text. `address2` is optional; an empty value is
/// stored as `None` so that reading it back through [`Address::get`] still
/// yields exactly what was written.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full_name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    /// Empty address with a preset country.
    pub fn with_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }

    /// Read one field. A missing `address2` reads as the empty string.
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::FullName => &self.full_name,
            AddressField::Address1 => &self.address1,
            AddressField::Address2 => self.address2.as_deref().unwrap_or_default(),
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::PostalCode => &self.postal_code,
            AddressField::Country => &self.country,
        }
    }

    /// Overwrite one field with the raw value; no trimming or checking.
    pub fn set(&mut self, field: AddressField, value: String) {
        match field {
            AddressField::FullName => self.full_name = value,
            AddressField::Address1 => self.address1 = value,
            AddressField::Address2 => {
                self.address2 = if value.is_empty() { None } else { Some(value) }
            }
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::PostalCode => self.postal_code = value,
            AddressField::Country => self.country = value,
        }
    }
}
