//! Pure field validation for the checkout steps.
//!
//! Validators accumulate every violated rule instead of stopping at the
//! first one, using stillwater's `Validation` type. A failed validation
//! carries a `NonEmptyVec<FieldError>`; [`into_result`] converts it into the
//! [`FieldErrors`] map the session keeps for the presentation layer.
//!
//! # Example
//!
//! ```rust
//! use checkout_flow::model::{PaymentDetails, PaymentField, StepScope};
//! use checkout_flow::validation::{into_result, validate_payment};
//!
//! let payment = PaymentDetails {
//!     card_number: "1234567890123456".to_string(),
//!     expiry_date: "13/29".to_string(),
//!     cvc: "12".to_string(),
//! };
//!
//! let errors = into_result(validate_payment(&payment)).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! assert!(errors.contains(StepScope::Payment, PaymentField::ExpiryDate));
//! assert!(errors.contains(StepScope::Payment, PaymentField::Cvc));
//! ```

mod error;
mod rules;

pub use error::{FieldError, FieldErrors};
pub use rules::{
    min_length, validate_address, validate_billing, validate_draft, validate_payment,
    MISSING_BILLING_ADDRESS,
};

use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a validator: success, or every field that failed.
pub type FieldValidation = Validation<(), NonEmptyVec<FieldError>>;

/// Collapse a validation into a `Result` carrying the error map.
pub fn into_result(validation: FieldValidation) -> Result<(), FieldErrors> {
    match validation {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(FieldErrors::from(errors)),
    }
}
