//! Checkout steps and the order they are walked in.

use crate::model::StepScope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in the checkout flow.
///
/// `Shipping → Billing → Payment → Submitted`. `Submitted` is terminal.
///
/// # Example
///
/// ```rust
/// use checkout_flow::machine::CheckoutStep;
///
/// let step = CheckoutStep::default();
/// assert_eq!(step, CheckoutStep::Shipping);
/// assert_eq!(step.next(), Some(CheckoutStep::Billing));
/// assert_eq!(step.previous(), None);
/// assert_eq!(step.to_string(), "Step 1 of 3: Shipping");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Billing,
    Payment,
    Submitted,
}

impl CheckoutStep {
    /// Number of steps that collect input.
    pub const INPUT_STEPS: u8 = 3;

    pub fn name(&self) -> &'static str {
        match self {
            Self::Shipping => "Shipping",
            Self::Billing => "Billing",
            Self::Payment => "Payment",
            Self::Submitted => "Submitted",
        }
    }

    /// Terminal state: nothing moves out of it.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// 1-based position among the input steps.
    pub fn number(&self) -> Option<u8> {
        match self {
            Self::Shipping => Some(1),
            Self::Billing => Some(2),
            Self::Payment => Some(3),
            Self::Submitted => None,
        }
    }

    /// Fields edited while this step is shown.
    pub fn scope(&self) -> Option<StepScope> {
        match self {
            Self::Shipping => Some(StepScope::Shipping),
            Self::Billing => Some(StepScope::Billing),
            Self::Payment => Some(StepScope::Payment),
            Self::Submitted => None,
        }
    }

    /// Step reached by `advance`. Payment has none: it ends with a submit.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Shipping => Some(Self::Billing),
            Self::Billing => Some(Self::Payment),
            Self::Payment | Self::Submitted => None,
        }
    }

    /// Step reached by `retreat`.
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Billing => Some(Self::Shipping),
            Self::Payment => Some(Self::Billing),
            Self::Shipping | Self::Submitted => None,
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(n) => write!(f, "Step {n} of {}: {}", Self::INPUT_STEPS, self.name()),
            None => f.write_str(self.name()),
        }
    }
}
