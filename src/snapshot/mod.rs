//! Serializable snapshots of a checkout session.
//!
//! A snapshot captures everything the presentation layer needs to render a
//! session (step, draft, current errors) plus its history and, once
//! submitted, the order. Snapshots encode to JSON for readability or to
//! bincode for compactness. Where they are kept is up to the caller.

mod error;

pub use error::SnapshotError;

use crate::machine::{CheckoutSession, CheckoutStep, StepHistory};
use crate::model::CheckoutDraft;
use crate::placement::{Order, OrderReceipt};
use crate::validation::FieldErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Point-in-time copy of a [`CheckoutSession`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Format version, checked on load
    pub version: u32,
    /// Id of the captured session
    pub session_id: Uuid,
    /// When the session was started
    pub started_at: DateTime<Utc>,
    /// When this snapshot was taken
    pub taken_at: DateTime<Utc>,
    /// Current step
    pub step: CheckoutStep,
    /// Everything entered so far
    pub draft: CheckoutDraft,
    /// Errors shown at snapshot time
    pub errors: FieldErrors,
    /// Step changes so far
    pub history: StepHistory,
    /// Emitted order, once submitted
    pub order: Option<Order>,
    /// Placement receipt, once submitted
    pub receipt: Option<OrderReceipt>,
    /// Order that was being placed when the snapshot was taken
    pub pending_order: Option<Uuid>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(())
        } else {
            Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            })
        }
    }

    /// The step, order and history must agree with each other, and the
    /// history must be one unbroken walk from `Shipping`.
    fn check_consistency(&self) -> Result<(), SnapshotError> {
        let submitted = self.step.is_final();
        if submitted != self.order.is_some() || submitted != self.receipt.is_some() {
            return Err(SnapshotError::Inconsistent(format!(
                "step {} does not match presence of order and receipt",
                self.step.name()
            )));
        }

        if self.pending_order.is_some() && self.step != CheckoutStep::Payment {
            return Err(SnapshotError::Inconsistent(format!(
                "order in flight on the {} step",
                self.step.name()
            )));
        }

        let mut last_step = CheckoutStep::Shipping;
        for transition in self.history.transitions() {
            if transition.from != last_step {
                return Err(SnapshotError::Inconsistent(format!(
                    "history jumps from {} to a transition out of {}",
                    last_step.name(),
                    transition.from.name()
                )));
            }
            last_step = transition.to;
        }
        if last_step != self.step {
            return Err(SnapshotError::Inconsistent(format!(
                "history ends at {} but step is {}",
                last_step.name(),
                self.step.name()
            )));
        }

        Ok(())
    }
}

impl CheckoutSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            session_id: self.id,
            started_at: self.started_at,
            taken_at: Utc::now(),
            step: self.step,
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            history: self.history.clone(),
            order: self.order.clone(),
            receipt: self.receipt.clone(),
            pending_order: self.pending,
        }
    }

    /// Rebuild a session from a snapshot after checking it is coherent.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        snapshot.check_version()?;
        snapshot.check_consistency()?;

        tracing::debug!(
            session = %snapshot.session_id,
            step = snapshot.step.name(),
            "checkout session restored"
        );
        Ok(Self {
            id: snapshot.session_id,
            started_at: snapshot.started_at,
            step: snapshot.step,
            draft: snapshot.draft,
            errors: snapshot.errors,
            history: snapshot.history,
            order: snapshot.order,
            receipt: snapshot.receipt,
            pending: snapshot.pending_order,
        })
    }
}
