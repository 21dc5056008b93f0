//! Field identifiers used to route edits and to label validation errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three editable checkout steps.
///
/// A scope routes a field edit to the right sub-record of the draft and
/// tells the presentation layer which step an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepScope {
    Shipping,
    Billing,
    Payment,
}

impl StepScope {
    pub const ALL: [Self; 3] = [Self::Shipping, Self::Billing, Self::Payment];

    pub fn name(self) -> &'static str {
        match self {
            Self::Shipping => "shipping",
            Self::Billing => "billing",
            Self::Payment => "payment",
        }
    }
}

impl fmt::Display for StepScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a field name does not belong to the requested record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownFieldName(pub String);

/// A field of an [`Address`](super::Address).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressField {
    FullName,
    Address1,
    Address2,
    City,
    State,
    PostalCode,
    Country,
}

impl AddressField {
    pub const ALL: [Self; 7] = [
        Self::FullName,
        Self::Address1,
        Self::Address2,
        Self::City,
        Self::State,
        Self::PostalCode,
        Self::Country,
    ];

    /// Form name of the field, as the presentation layer spells it.
    pub fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Address1 => "address1",
            Self::Address2 => "address2",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postalCode",
            Self::Country => "country",
        }
    }
}

impl FromStr for AddressField {
    type Err = UnknownFieldName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownFieldName(s.to_string()))
    }
}

/// A field of [`PaymentDetails`](super::PaymentDetails).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentField {
    CardNumber,
    ExpiryDate,
    Cvc,
}

impl PaymentField {
    pub const ALL: [Self; 3] = [Self::CardNumber, Self::ExpiryDate, Self::Cvc];

    pub fn name(self) -> &'static str {
        match self {
            Self::CardNumber => "cardNumber",
            Self::ExpiryDate => "expiryDate",
            Self::Cvc => "cvc",
        }
    }
}

impl FromStr for PaymentField {
    type Err = UnknownFieldName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownFieldName(s.to_string()))
    }
}

/// Any field an error can be attached to.
///
/// `BillingAddress` labels the whole billing record; it is used when a
/// distinct billing address was requested but never entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Address(AddressField),
    BillingAddress,
    Payment(PaymentField),
}

impl Field {
    /// Form name of the billing checkbox. It is a flag, not a field that
    /// can fail validation.
    pub const SAME_AS_SHIPPING: &'static str = "sameAsShipping";

    pub fn name(self) -> &'static str {
        match self {
            Self::Address(field) => field.name(),
            Self::BillingAddress => "billingAddress",
            Self::Payment(field) => field.name(),
        }
    }
}

impl From<AddressField> for Field {
    fn from(field: AddressField) -> Self {
        Self::Address(field)
    }
}

impl From<PaymentField> for Field {
    fn from(field: PaymentField) -> Self {
        Self::Payment(field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
