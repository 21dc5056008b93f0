//! The record emitted when a checkout completes.

use crate::model::{Address, BillingSelection, CheckoutDraft, PaymentDetails};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed checkout.
///
/// Billing is resolved: when the customer chose "same as shipping", any
/// billing data still sitting in the draft is left out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    pub id: Uuid,
    /// When the order was assembled from the draft
    pub placed_at: DateTime<Utc>,
    /// Where the goods go
    pub shipping: Address,
    /// Shipping address reused, or the distinct billing address
    pub billing: BillingSelection,
    /// Card details as entered
    pub payment: PaymentDetails,
}

impl Order {
    /// Build from a draft that has already passed validation.
    pub fn new(draft: &CheckoutDraft, billing: BillingSelection) -> Self {
        Self {
            id: Uuid::new_v4(),
            placed_at: Utc::now(),
            shipping: draft.shipping.clone(),
            billing,
            payment: draft.payment.clone(),
        }
    }

    /// Whether the order still reflects `draft`: same shipping, payment and
    /// resolved billing.
    pub fn matches_draft(&self, draft: &CheckoutDraft) -> bool {
        self.shipping == draft.shipping
            && self.payment == draft.payment
            && draft.billing_selection().as_ref() == Some(&self.billing)
    }

    /// Address the bill goes to.
    pub fn billing_address(&self) -> &Address {
        match &self.billing {
            BillingSelection::SameAsShipping => &self.shipping,
            BillingSelection::DistinctAddress(address) => address,
        }
    }
}

/// Acknowledgement returned by the placement service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Id of the accepted order
    pub order_id: Uuid,
    /// When the placement service accepted it
    pub accepted_at: DateTime<Utc>,
    /// Message to show the customer
    pub message: String,
}

/// An order together with the receipt the placement service returned.
///
/// Only produced by a session's own submission, so a session can trust it
/// came from an order it validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedOrder {
    pub(crate) order: Order,
    pub(crate) receipt: OrderReceipt,
}

impl PlacedOrder {
    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn receipt(&self) -> &OrderReceipt {
        &self.receipt
    }
}
