//! Handing a completed checkout to whoever places the order.
//!
//! The session never talks to a backend directly. It assembles an [`Order`]
//! and passes it to an [`OrderPlacement`] implementation, either
//! synchronously through `CheckoutSession::submit` or as a stillwater effect
//! through `CheckoutSession::submission`, where the placement service is
//! the effect environment.

mod order;

pub use order::{Order, OrderReceipt, PlacedOrder};

use chrono::Utc;
use thiserror::Error;

/// Failures reported by an order-placement service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("Order was declined: {reason}")]
    Declined { reason: String },

    #[error("Order service unavailable: {0}")]
    Unavailable(String),
}

/// Accepts one order per completed checkout.
pub trait OrderPlacement {
    fn place_order(&self, order: &Order) -> Result<OrderReceipt, PlacementError>;
}

impl<P: OrderPlacement + ?Sized> OrderPlacement for &P {
    fn place_order(&self, order: &Order) -> Result<OrderReceipt, PlacementError> {
        (**self).place_order(order)
    }
}

impl<P: OrderPlacement + ?Sized> OrderPlacement for std::sync::Arc<P> {
    fn place_order(&self, order: &Order) -> Result<OrderReceipt, PlacementError> {
        (**self).place_order(order)
    }
}

pub const CONFIRMATION_MESSAGE: &str = "You will receive a confirmation email shortly.";

/// Acknowledges every order locally without contacting anything.
///
/// This is the storefront's only "backend": log the order and tell the
/// customer a confirmation email is on its way.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcknowledgingPlacement;

impl OrderPlacement for AcknowledgingPlacement {
    fn place_order(&self, order: &Order) -> Result<OrderReceipt, PlacementError> {
        tracing::info!(
            order_id = %order.id,
            card = %order.payment.last_four(),
            "Order placed successfully"
        );
        Ok(OrderReceipt {
            order_id: order.id,
            accepted_at: Utc::now(),
            message: CONFIRMATION_MESSAGE.to_string(),
        })
    }
}
