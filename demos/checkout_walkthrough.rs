//! Checkout Walkthrough
//!
//! This example walks a shopper from cart to confirmation.
//!
//! Key concepts:
//! - Cart totals with decimal prices
//! - Step gating: each step validates before moving on
//! - Accumulated field errors for the presentation layer
//! - Effect-based order placement with a swappable environment
//! - Snapshot hand-off between two sessions
//!
//! Run with: cargo run --example checkout_walkthrough

use checkout_flow::cart::Cart;
use checkout_flow::placement::AcknowledgingPlacement;
use checkout_flow::snapshot::SessionSnapshot;
use checkout_flow::{CheckoutConfig, CheckoutError, CheckoutSession, StepScope};
use stillwater::effect::Effect;

fn show_errors(error: &CheckoutError) {
    println!("  blocked: {error}");
    if let Some(errors) = error.field_errors() {
        for field_error in errors {
            println!("    - {field_error}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("checkout_flow=debug")
        .init();

    println!("=== Cart ===");
    let mut cart = Cart::sample();
    cart.set_quantity(2, 3);
    for item in cart.items() {
        println!(
            "  {} x{} @ ${} = ${}",
            item.name,
            item.quantity,
            item.unit_price,
            item.line_total()
        );
    }
    println!("  {} items, subtotal ${}", cart.item_count(), cart.subtotal());

    let config = CheckoutConfig::from_json(r#"{"defaultCountry": "USA"}"#)?;
    let mut session = CheckoutSession::builder().config(config).build();

    println!("\n=== {} ===", session.step());
    if let Err(error) = session.advance() {
        show_errors(&error);
    }

    for (field, value) in [
        ("fullName", "Mary Jackson"),
        ("address1", "40 Wind Tunnel Rd"),
        ("city", "Hampton"),
        ("state", "VA"),
        ("postalCode", "23666"),
    ] {
        session.update_field(StepScope::Shipping, field, value)?;
    }
    session.advance()?;

    println!("\n=== {} ===", session.step());
    session.update_field(StepScope::Billing, "sameAsShipping", "false")?;
    if let Err(error) = session.advance() {
        show_errors(&error);
    }
    session.update_field(StepScope::Billing, "sameAsShipping", "true")?;
    session.advance()?;

    println!("\n=== {} ===", session.step());
    session.update_field(StepScope::Payment, "cardNumber", "4111 1111")?;
    if let Err(error) = session.submit(&AcknowledgingPlacement) {
        show_errors(&error);
    }

    // Hand the session over, as a page reload would.
    let json = session.snapshot().to_json()?;
    let mut session = CheckoutSession::restore(SessionSnapshot::from_json(&json)?)?;
    println!("  restored session {} on {}", session.id(), session.step());

    session.update_field(StepScope::Payment, "cardNumber", "4111111111111111")?;
    session.update_field(StepScope::Payment, "expiryDate", "09/29")?;
    session.update_field(StepScope::Payment, "cvc", "737")?;

    let attempt = session
        .submission::<AcknowledgingPlacement>()
        .run(&AcknowledgingPlacement)
        .await;
    let receipt = session.apply_submission(attempt)?;

    println!("\n=== Submitted ===");
    println!("  order {}", receipt.order_id);
    println!("  {}", receipt.message);
    if let Some(order) = session.order() {
        println!("  card {:?}", order.payment);
        println!("  ship to {}, {}", order.shipping.full_name, order.shipping.city);
    }
    println!("  path: {:?}", session.history().path());

    Ok(())
}
