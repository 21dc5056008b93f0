//! Field rules for each checkout step.
//!
//! Every function here is pure: same input, same result. Rules are checked
//! independently and all failures are accumulated with stillwater's
//! `Validation`, so one pass reports every field that needs fixing.

use super::error::FieldError;
use super::FieldValidation;
use crate::model::{Address, AddressField, CheckoutDraft, Field, PaymentDetails, PaymentField, StepScope};
use regex::Regex;
use std::sync::LazyLock;
use stillwater::validation::Validation;

pub const MISSING_BILLING_ADDRESS: &str = "Billing address is required when not same as shipping";

/// Minimum trimmed length and message for each required address field.
const ADDRESS_RULES: [(AddressField, usize, &str); 6] = [
    (AddressField::FullName, 2, "Full name is required"),
    (AddressField::Address1, 5, "Street address is required"),
    (AddressField::City, 2, "City is required"),
    (AddressField::State, 2, "State / Province is required"),
    (AddressField::PostalCode, 5, "Postal code is required"),
    (AddressField::Country, 2, "Country is required"),
];

// ASCII classes on purpose: `\d` would also accept non-ASCII digits.
static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("Invalid regex"));
static EXPIRY_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").expect("Invalid regex"));
static CVC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").expect("Invalid regex"));

/// Minimum length of a required address field; `None` for `address2`.
pub fn min_length(field: AddressField) -> Option<usize> {
    ADDRESS_RULES
        .iter()
        .find(|(rule_field, _, _)| *rule_field == field)
        .map(|(_, min, _)| *min)
}

fn check(passes: bool, error: impl FnOnce() -> FieldError) -> FieldValidation {
    if passes {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

fn meets_min_length(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Check an address, attributing errors to `scope`.
///
/// `address2` is optional and never produces an error.
pub fn validate_address(address: &Address, scope: StepScope) -> FieldValidation {
    let checks: Vec<FieldValidation> = ADDRESS_RULES
        .iter()
        .map(|&(field, min, message)| {
            check(meets_min_length(address.get(field), min), || {
                FieldError::new(scope, field, message)
            })
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

/// Check card number, expiry date (MM/YY) and CVC.
pub fn validate_payment(payment: &PaymentDetails) -> FieldValidation {
    let rules = [
        (PaymentField::CardNumber, &*CARD_NUMBER_RE, "Card number must be 16 digits"),
        (PaymentField::ExpiryDate, &*EXPIRY_DATE_RE, "Invalid format. Use MM/YY"),
        (PaymentField::Cvc, &*CVC_RE, "CVC must be 3 or 4 digits"),
    ];

    let checks: Vec<FieldValidation> = rules
        .into_iter()
        .map(|(field, pattern, message)| {
            check(pattern.is_match(payment.get(field)), || {
                FieldError::new(StepScope::Payment, field, message)
            })
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

/// Check the billing step.
///
/// Passes outright when billing is the same as shipping, whatever the
/// stored billing address contains.
pub fn validate_billing(draft: &CheckoutDraft) -> FieldValidation {
    if draft.same_as_shipping {
        return Validation::success(());
    }

    match &draft.billing {
        Some(address) => validate_address(address, StepScope::Billing),
        None => Validation::fail(FieldError::new(
            StepScope::Billing,
            Field::BillingAddress,
            MISSING_BILLING_ADDRESS,
        )),
    }
}

/// Check the whole draft: shipping, billing and payment together.
pub fn validate_draft(draft: &CheckoutDraft) -> FieldValidation {
    Validation::all_vec(vec![
        validate_address(&draft.shipping, StepScope::Shipping),
        validate_billing(draft),
        validate_payment(&draft.payment),
    ])
    .map(|_| ())
}
