//! A single checkout session: current step, draft, and the operations that
//! move between steps.

use super::error::{CheckoutError, Operation};
use super::history::{StepHistory, StepTransition, Trigger};
use super::step::CheckoutStep;
use crate::builder::CheckoutSessionBuilder;
use crate::model::{AddressField, CheckoutDraft, Field, FieldUpdate, PaymentField, StepScope};
use crate::placement::{Order, OrderPlacement, OrderReceipt, PlacedOrder};
use crate::validation::{
    into_result, validate_address, validate_billing, validate_draft, FieldError, FieldErrors,
    FieldValidation, MISSING_BILLING_ADDRESS,
};
use chrono::{DateTime, Utc};
use stillwater::effect::Effect;
use stillwater::prelude::*;
use stillwater::validation::Validation;
use uuid::Uuid;

/// Result of a submission attempt, as produced by running
/// [`CheckoutSession::submission`].
pub type SubmissionAttempt = Result<PlacedOrder, CheckoutError>;

/// Owns one checkout flow.
///
/// The draft and current step are only changed through `advance`,
/// `retreat`, `update`/`update_field` and `submit` (or its effectful pair
/// `submission`/`apply_submission`). Every operation reports the outcome
/// directly; the presentation layer reads `step`, `draft` and `errors`
/// afterwards to re-render.
///
/// # Example
///
/// ```rust
/// use checkout_flow::machine::{CheckoutSession, CheckoutStep};
/// use checkout_flow::model::StepScope;
///
/// let mut session = CheckoutSession::new();
///
/// // Nothing entered yet: the shipping step holds.
/// assert!(session.advance().is_err());
/// assert_eq!(session.step(), CheckoutStep::Shipping);
///
/// for (field, value) in [
///     ("fullName", "Grace Hopper"),
///     ("address1", "1 Compiler Court"),
///     ("city", "Arlington"),
///     ("state", "VA"),
///     ("postalCode", "22201"),
/// ] {
///     session.update_field(StepScope::Shipping, field, value).unwrap();
/// }
///
/// assert_eq!(session.advance(), Ok(CheckoutStep::Billing));
/// // Billing defaults to the shipping address.
/// assert_eq!(session.advance(), Ok(CheckoutStep::Payment));
/// ```
#[derive(Clone, Debug)]
pub struct CheckoutSession {
    pub(crate) id: Uuid,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) step: CheckoutStep,
    pub(crate) draft: CheckoutDraft,
    pub(crate) errors: FieldErrors,
    pub(crate) history: StepHistory,
    pub(crate) order: Option<Order>,
    pub(crate) receipt: Option<OrderReceipt>,
    pub(crate) pending: Option<Uuid>,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutSession {
    /// Session with the default configuration, starting at `Shipping`.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> CheckoutSessionBuilder {
        CheckoutSessionBuilder::new()
    }

    pub(crate) fn start(id: Uuid, draft: CheckoutDraft) -> Self {
        tracing::debug!(session = %id, "checkout session started");
        Self {
            id,
            started_at: Utc::now(),
            step: CheckoutStep::Shipping,
            draft,
            errors: FieldErrors::new(),
            history: StepHistory::new(),
            order: None,
            receipt: None,
            pending: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn draft(&self) -> &CheckoutDraft {
        &self.draft
    }

    /// Errors from the most recent validation that failed. Cleared by any
    /// step change.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    /// The order emitted on submission.
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn receipt(&self) -> Option<&OrderReceipt> {
        self.receipt.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.step.is_final()
    }

    /// Id of the order currently being placed, if any.
    pub fn pending_order(&self) -> Option<Uuid> {
        self.pending
    }

    /// Validate the current step and move forward if it passes.
    ///
    /// On `Billing` with "same as shipping" checked, billing fields are not
    /// looked at. `Payment` does not advance; it ends with [`submit`].
    ///
    /// [`submit`]: CheckoutSession::submit
    pub fn advance(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let validation = match self.step {
            CheckoutStep::Shipping => validate_address(&self.draft.shipping, StepScope::Shipping),
            CheckoutStep::Billing => validate_billing(&self.draft),
            CheckoutStep::Payment => return Err(self.unavailable(Operation::Advance)),
            CheckoutStep::Submitted => return Err(CheckoutError::AlreadySubmitted),
        };

        self.gate(validation)?;
        let next = self
            .step
            .next()
            .ok_or_else(|| self.unavailable(Operation::Advance))?;
        self.transition(next, Trigger::Advance);
        Ok(next)
    }

    /// Go back one step. Entered data is kept as is and not revalidated.
    ///
    /// Refused while an order is being placed.
    pub fn retreat(&mut self) -> Result<CheckoutStep, CheckoutError> {
        if self.step.is_final() {
            return Err(CheckoutError::AlreadySubmitted);
        }
        if let Some(order_id) = self.pending {
            return Err(CheckoutError::SubmissionInFlight { order_id });
        }
        let previous = self
            .step
            .previous()
            .ok_or_else(|| self.unavailable(Operation::Retreat))?;

        self.transition(previous, Trigger::Retreat);
        Ok(previous)
    }

    /// Write one field into the draft. Never validates, never changes step.
    pub fn update(&mut self, update: FieldUpdate) {
        self.draft.apply(update);
    }

    /// Write one field addressed by its form name.
    ///
    /// Billing accepts `sameAsShipping` with the value `true` or `false` in
    /// addition to the address fields. Fails only when the name does not
    /// exist in `scope` or the flag value is not a boolean.
    pub fn update_field(
        &mut self,
        scope: StepScope,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), CheckoutError> {
        let value = value.into();
        let update = match scope {
            StepScope::Shipping => FieldUpdate::Shipping(address_field(scope, name)?, value),
            StepScope::Billing if name == Field::SAME_AS_SHIPPING => {
                let same = value.parse().map_err(|_| CheckoutError::InvalidFlag {
                    name: name.to_string(),
                    value,
                })?;
                FieldUpdate::SameAsShipping(same)
            }
            StepScope::Billing => FieldUpdate::Billing(address_field(scope, name)?, value),
            StepScope::Payment => FieldUpdate::Payment(payment_field(name)?, value),
        };
        self.update(update);
        Ok(())
    }

    /// Read one field by form name. `None` for unknown names, and for billing
    /// address fields while no billing address has been entered.
    pub fn field(&self, scope: StepScope, name: &str) -> Option<String> {
        match scope {
            StepScope::Shipping => {
                let field = name.parse::<AddressField>().ok()?;
                Some(self.draft.shipping.get(field).to_string())
            }
            StepScope::Billing if name == Field::SAME_AS_SHIPPING => {
                Some(self.draft.same_as_shipping.to_string())
            }
            StepScope::Billing => {
                let field = name.parse::<AddressField>().ok()?;
                self.draft
                    .billing
                    .as_ref()
                    .map(|billing| billing.get(field).to_string())
            }
            StepScope::Payment => {
                let field = name.parse::<PaymentField>().ok()?;
                Some(self.draft.payment.get(field).to_string())
            }
        }
    }

    /// Validate the draft and assemble the order, without changing the
    /// session.
    ///
    /// Only available on the payment step. Payment is checked along with the
    /// earlier steps, since those fields may have been edited after they
    /// were passed.
    pub fn prepare_order(&self) -> Result<Order, CheckoutError> {
        match self.step {
            CheckoutStep::Payment => {}
            CheckoutStep::Submitted => return Err(CheckoutError::AlreadySubmitted),
            _ => return Err(self.unavailable(Operation::Submit)),
        }

        into_result(validate_draft(&self.draft)).map_err(CheckoutError::InvalidFields)?;
        let billing = self.draft.billing_selection().ok_or_else(|| {
            CheckoutError::InvalidFields(
                [FieldError::new(
                    StepScope::Billing,
                    Field::BillingAddress,
                    MISSING_BILLING_ADDRESS,
                )]
                .into_iter()
                .collect(),
            )
        })?;

        Ok(Order::new(&self.draft, billing))
    }

    /// Validate, hand the order to `placement`, and finish the flow.
    ///
    /// On any failure the session stays on `Payment`; on invalid fields
    /// nothing is sent.
    pub fn submit<P>(&mut self, placement: &P) -> Result<OrderReceipt, CheckoutError>
    where
        P: OrderPlacement + ?Sized,
    {
        let attempt = self.begin_submission().and_then(|order| {
            let receipt = placement.place_order(&order)?;
            Ok(PlacedOrder { order, receipt })
        });
        self.apply_submission(attempt)
    }

    /// Build the submission as an effect over the placement service.
    ///
    /// The order is validated and marked as in flight right away; a second
    /// submission is refused with [`CheckoutError::SubmissionInFlight`] until
    /// the outcome is handed to [`apply_submission`]. The effect holds its
    /// own copy of the order, so the UI can keep rendering the session while
    /// an asynchronous placement runs.
    ///
    /// [`apply_submission`]: CheckoutSession::apply_submission
    pub fn submission<Env>(
        &mut self,
    ) -> impl Effect<Output = PlacedOrder, Error = CheckoutError, Env = Env>
    where
        Env: OrderPlacement + Clone + Send + Sync + 'static,
    {
        let order = match self.begin_submission() {
            Ok(order) => order,
            Err(error) => return fail(error).boxed(),
        };

        from_fn(move |env: &Env| {
            env.place_order(&order)
                .map(|receipt| PlacedOrder {
                    order: order.clone(),
                    receipt,
                })
                .map_err(CheckoutError::from)
        })
        .boxed()
    }

    /// Apply the outcome of a submission attempt.
    ///
    /// A placed order is accepted only if it is the one this session has
    /// in flight and the draft has not been edited since it was built. A
    /// failed placement releases the in-flight order so submit can be
    /// retried.
    pub fn apply_submission(
        &mut self,
        attempt: SubmissionAttempt,
    ) -> Result<OrderReceipt, CheckoutError> {
        match attempt {
            Ok(PlacedOrder { order, receipt }) => {
                if self.step != CheckoutStep::Payment {
                    tracing::warn!(
                        session = %self.id,
                        order_id = %order.id,
                        step = self.step.name(),
                        "ignoring order placed outside the payment step"
                    );
                    return Err(if self.step.is_final() {
                        CheckoutError::AlreadySubmitted
                    } else {
                        self.unavailable(Operation::Submit)
                    });
                }
                if self.pending != Some(order.id) {
                    tracing::warn!(session = %self.id, order_id = %order.id, "ignoring unknown order");
                    return Err(CheckoutError::UnknownOrder { order_id: order.id });
                }
                self.pending = None;
                if !order.matches_draft(&self.draft) {
                    tracing::warn!(
                        session = %self.id,
                        order_id = %order.id,
                        "draft edited while order was being placed"
                    );
                    return Err(CheckoutError::StaleOrder { order_id: order.id });
                }

                self.transition(CheckoutStep::Submitted, Trigger::Submit);
                tracing::info!(session = %self.id, order_id = %order.id, "checkout submitted");
                self.order = Some(order);
                self.receipt = Some(receipt.clone());
                Ok(receipt)
            }
            Err(CheckoutError::InvalidFields(errors)) => {
                tracing::debug!(
                    session = %self.id,
                    errors = errors.len(),
                    "submission blocked by invalid fields"
                );
                self.errors = errors.clone();
                Err(CheckoutError::InvalidFields(errors))
            }
            Err(CheckoutError::Placement(error)) => {
                tracing::warn!(session = %self.id, %error, "order placement failed");
                self.pending = None;
                Err(CheckoutError::Placement(error))
            }
            Err(error) => Err(error),
        }
    }

    /// Forget the order in flight, for when its effect was dropped without
    /// running. Returns the released order id.
    ///
    /// If the order did reach the placement service, reconciling it is up to
    /// the caller.
    pub fn abandon_submission(&mut self) -> Option<Uuid> {
        let released = self.pending.take();
        if let Some(order_id) = released {
            tracing::debug!(session = %self.id, %order_id, "in-flight order abandoned");
        }
        released
    }

    fn begin_submission(&mut self) -> Result<Order, CheckoutError> {
        if let Some(order_id) = self.pending {
            return Err(CheckoutError::SubmissionInFlight { order_id });
        }
        let order = self.prepare_order()?;
        self.pending = Some(order.id);
        Ok(order)
    }

    fn gate(&mut self, validation: FieldValidation) -> Result<(), CheckoutError> {
        match validation {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) => {
                let errors = FieldErrors::from(errors);
                tracing::debug!(
                    session = %self.id,
                    step = self.step.name(),
                    errors = errors.len(),
                    "step blocked by invalid fields"
                );
                self.errors = errors.clone();
                Err(CheckoutError::InvalidFields(errors))
            }
        }
    }

    fn transition(&mut self, to: CheckoutStep, trigger: Trigger) {
        tracing::debug!(
            session = %self.id,
            from = self.step.name(),
            to = to.name(),
            ?trigger,
            "checkout step changed"
        );
        self.history = self.history.record(StepTransition {
            from: self.step,
            to,
            trigger,
            timestamp: Utc::now(),
        });
        self.errors = FieldErrors::new();
        self.step = to;
    }

    fn unavailable(&self, operation: Operation) -> CheckoutError {
        CheckoutError::StepUnavailable {
            operation,
            step: self.step,
        }
    }
}

fn address_field(scope: StepScope, name: &str) -> Result<AddressField, CheckoutError> {
    name.parse().map_err(|_| CheckoutError::UnknownField {
        scope,
        name: name.to_string(),
    })
}

fn payment_field(name: &str) -> Result<PaymentField, CheckoutError> {
    name.parse().map_err(|_| CheckoutError::UnknownField {
        scope: StepScope::Payment,
        name: name.to_string(),
    })
}
