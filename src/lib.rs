//! checkout-flow: step-gated checkout for a single-product storefront
//!
//! The crate keeps the checkout logic apart from any UI framework. A
//! [`CheckoutSession`] owns the draft and the current step; validation is a
//! set of pure functions that accumulate every failing field; order
//! placement is a collaborator behind the [`OrderPlacement`] trait.
//!
//! # Core Concepts
//!
//! - **Steps**: `Shipping → Billing → Payment → Submitted`
//! - **Validation**: pure, accumulating field rules built on stillwater's `Validation`
//! - **Placement**: synchronous `submit`, or an effect via `submission`
//! - **Snapshots**: JSON or binary copies of a session for hand-off
//!
//! # Example
//!
//! ```rust
//! use checkout_flow::machine::CheckoutStep;
//! use checkout_flow::model::StepScope;
//! use checkout_flow::placement::AcknowledgingPlacement;
//! use checkout_flow::CheckoutSession;
//!
//! let mut session = CheckoutSession::new();
//!
//! let shipping = [
//!     ("fullName", "Ada Lovelace"),
//!     ("address1", "12 Analytical Way"),
//!     ("city", "London"),
//!     ("state", "LDN"),
//!     ("postalCode", "SW1A 1AA"),
//! ];
//! for (field, value) in shipping {
//!     session.update_field(StepScope::Shipping, field, value).unwrap();
//! }
//! session.advance().unwrap();
//! session.advance().unwrap();
//!
//! session.update_field(StepScope::Payment, "cardNumber", "1234567890123456").unwrap();
//! session.update_field(StepScope::Payment, "expiryDate", "12/29").unwrap();
//! session.update_field(StepScope::Payment, "cvc", "123").unwrap();
//!
//! let receipt = session.submit(&AcknowledgingPlacement).unwrap();
//! assert_eq!(session.step(), CheckoutStep::Submitted);
//! assert_eq!(session.order().map(|order| order.id), Some(receipt.order_id));
//! ```

pub mod builder;
pub mod cart;
pub mod machine;
pub mod model;
pub mod placement;
pub mod snapshot;
pub mod validation;

// Re-export commonly used types
pub use builder::{CheckoutConfig, CheckoutSessionBuilder};
pub use machine::{CheckoutError, CheckoutSession, CheckoutStep};
pub use model::{Address, BillingSelection, CheckoutDraft, FieldUpdate, PaymentDetails, StepScope};
pub use placement::{Order, OrderPlacement, OrderReceipt};
pub use validation::{FieldError, FieldErrors};
