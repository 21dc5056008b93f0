//! Errors returned by checkout session operations.

use super::step::CheckoutStep;
use crate::model::StepScope;
use crate::placement::PlacementError;
use crate::validation::FieldErrors;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Session operation, named in [`CheckoutError::StepUnavailable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Advance,
    Retreat,
    Submit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Advance => "advance",
            Self::Retreat => "retreat",
            Self::Submit => "submit",
        })
    }
}

/// Why an operation left the session where it was.
///
/// None of these are fatal; the session stays usable after every one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("{count} field(s) need attention: {0}", count = .0.len())]
    InvalidFields(FieldErrors),

    #[error("Cannot {operation} from the {step_name} step", step_name = .step.name())]
    StepUnavailable {
        operation: Operation,
        step: CheckoutStep,
    },

    #[error("Unknown {scope} field '{name}'")]
    UnknownField { scope: StepScope, name: String },

    #[error("Expected true or false for '{name}', got '{value}'")]
    InvalidFlag { name: String, value: String },

    #[error("Checkout has already been submitted")]
    AlreadySubmitted,

    #[error("Order {order_id} is still being placed")]
    SubmissionInFlight { order_id: Uuid },

    #[error("Order {order_id} was not submitted by this checkout")]
    UnknownOrder { order_id: Uuid },

    /// The draft was edited while the order was being placed.
    #[error("Order {order_id} no longer matches the checkout details")]
    StaleOrder { order_id: Uuid },

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

impl CheckoutError {
    /// Field errors carried by this error, if it is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::InvalidFields(errors) => Some(errors),
            _ => None,
        }
    }
}
