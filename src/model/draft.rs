//! The in-progress checkout record and the edits that mutate it.

use super::address::Address;
use super::field::{AddressField, PaymentField};
use super::payment::PaymentDetails;
use serde::{Deserialize, Serialize};

/// Country preset on a fresh shipping address.
pub const DEFAULT_COUNTRY: &str = "USA";

/// Where the bill goes, once the choice is final.
///
/// The draft keeps the editable pair (`same_as_shipping`, `billing`) so that
/// flipping the checkbox never throws typed data away; an [`Order`] carries
/// this resolved form instead, where "distinct but missing" cannot exist.
///
/// [`Order`]: crate::placement::Order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingSelection {
    SameAsShipping,
    DistinctAddress(Address),
}

/// A single edit coming from the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    Shipping(AddressField, String),
    Billing(AddressField, String),
    SameAsShipping(bool),
    Payment(PaymentField, String),
}

/// In-progress checkout data, mutated field by field while the user types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDraft {
    pub shipping: Address,
    pub same_as_shipping: bool,
    pub billing: Option<Address>,
    pub payment: PaymentDetails,
}

impl Default for CheckoutDraft {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY, true)
    }
}

impl CheckoutDraft {
    /// Fresh draft: empty fields apart from the preset country and the
    /// billing checkbox.
    pub fn new(default_country: impl Into<String>, same_as_shipping: bool) -> Self {
        Self {
            shipping: Address::with_country(default_country),
            same_as_shipping,
            billing: None,
            payment: PaymentDetails::default(),
        }
    }

    /// Apply one edit. Never validates.
    ///
    /// Writing a billing field while no billing address exists creates an
    /// empty one first. Toggling `same_as_shipping` keeps billing data.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Shipping(field, value) => self.shipping.set(field, value),
            FieldUpdate::Billing(field, value) => self
                .billing
                .get_or_insert_with(Address::default)
                .set(field, value),
            FieldUpdate::SameAsShipping(same) => self.same_as_shipping = same,
            FieldUpdate::Payment(field, value) => self.payment.set(field, value),
        }
    }

    /// Resolve the billing choice, or `None` when a distinct address was
    /// requested but never entered.
    pub fn billing_selection(&self) -> Option<BillingSelection> {
        if self.same_as_shipping {
            return Some(BillingSelection::SameAsShipping);
        }
        self.billing.clone().map(BillingSelection::DistinctAddress)
    }

    /// The address the bill is sent to under the current choice.
    pub fn effective_billing_address(&self) -> Option<&Address> {
        if self.same_as_shipping {
            Some(&self.shipping)
        } else {
            self.billing.as_ref()
        }
    }
}
