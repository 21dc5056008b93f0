//! Card details collected on the payment step.

use super::field::PaymentField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card details as typed. Shape checks live in [`crate::validation`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry_date: String,
    pub cvc: String,
}

impl PaymentDetails {
    pub fn get(&self, field: PaymentField) -> &str {
        match field {
            PaymentField::CardNumber => &self.card_number,
            PaymentField::ExpiryDate => &self.expiry_date,
            PaymentField::Cvc => &self.cvc,
        }
    }

    pub fn set(&mut self, field: PaymentField, value: String) {
        match field {
            PaymentField::CardNumber => self.card_number = value,
            PaymentField::ExpiryDate => self.expiry_date = value,
            PaymentField::Cvc => self.cvc = value,
        }
    }

    /// Last four characters of the card number, for receipts and logs.
    pub fn last_four(&self) -> &str {
        let start = self
            .card_number
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(index, _)| index);
        &self.card_number[start..]
    }
}

// Card number and CVC never reach debug output.
impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_number", &format_args!("****{}", self.last_four()))
            .field("expiry_date", &self.expiry_date)
            .field("cvc", &"***")
            .finish()
    }
}
