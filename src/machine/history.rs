//! Record of the steps a checkout session has walked through.

use super::step::CheckoutStep;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Operation that caused a step change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    Advance,
    Retreat,
    Submit,
}

/// One step change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTransition {
    /// Step the session was on
    pub from: CheckoutStep,
    /// Step the session moved to
    pub to: CheckoutStep,
    /// Operation that caused the move
    pub trigger: Trigger,
    /// When the move happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered list of step changes.
///
/// `record` returns a new history and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use checkout_flow::machine::{CheckoutStep, StepHistory, StepTransition, Trigger};
/// use chrono::Utc;
///
/// let history = StepHistory::new().record(StepTransition {
///     from: CheckoutStep::Shipping,
///     to: CheckoutStep::Billing,
///     trigger: Trigger::Advance,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(
///     history.path(),
///     vec![CheckoutStep::Shipping, CheckoutStep::Billing]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepHistory {
    transitions: Vec<StepTransition>,
}

impl StepHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new history with `transition` appended.
    pub fn record(&self, transition: StepTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Steps visited in order: the first `from`, then every `to`.
    pub fn path(&self) -> Vec<CheckoutStep> {
        self.transitions
            .first()
            .map(|first| first.from)
            .into_iter()
            .chain(self.transitions.iter().map(|t| t.to))
            .collect()
    }

    /// Time between the first and the last recorded change.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// How many recorded changes came from `trigger`.
    pub fn count(&self, trigger: Trigger) -> usize {
        self.transitions
            .iter()
            .filter(|t| t.trigger == trigger)
            .count()
    }

    pub fn last(&self) -> Option<&StepTransition> {
        self.transitions.last()
    }

    pub fn transitions(&self) -> &[StepTransition] {
        &self.transitions
    }
}
