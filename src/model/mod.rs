//! Checkout data model.
//!
//! Plain data: addresses, card details, the draft that collects them, and
//! the identifiers used to address individual fields. Nothing here
//! validates; see [`crate::validation`].

mod address;
mod draft;
mod field;
mod payment;

pub use address::Address;
pub use draft::{BillingSelection, CheckoutDraft, FieldUpdate, DEFAULT_COUNTRY};
pub use field::{AddressField, Field, PaymentField, StepScope, UnknownFieldName};
pub use payment::PaymentDetails;
