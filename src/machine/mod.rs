//! The checkout state machine.
//!
//! A [`CheckoutSession`] walks `Shipping → Billing → Payment → Submitted`.
//! Forward moves are gated by the validators in [`crate::validation`];
//! backward moves are always allowed. Every step change is kept in a
//! [`StepHistory`].
//!
//! Submission comes in two shapes: [`CheckoutSession::submit`] calls the
//! placement service directly, while [`CheckoutSession::submission`]
//! returns a stillwater effect whose environment is the placement service,
//! to be finished with [`CheckoutSession::apply_submission`].

mod error;
mod history;
mod session;
mod step;

pub use error::{CheckoutError, Operation};
pub use history::{StepHistory, StepTransition, Trigger};
pub use session::{CheckoutSession, SubmissionAttempt};
pub use step::CheckoutStep;
