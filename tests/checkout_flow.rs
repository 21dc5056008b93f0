//! End-to-end checkout flows, including effect-based submission against a
//! placement service used as the effect environment.

use checkout_flow::machine::{CheckoutError, CheckoutSession, CheckoutStep, Trigger};
use checkout_flow::model::{AddressField, BillingSelection, Field, StepScope};
use checkout_flow::placement::{Order, OrderPlacement, OrderReceipt, PlacementError};
use checkout_flow::snapshot::SessionSnapshot;
use chrono::Utc;
use stillwater::effect::Effect;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct OrderDesk {
    placed: Arc<Mutex<Vec<Order>>>,
    offline: bool,
}

impl OrderDesk {
    fn placed(&self) -> Vec<Order> {
        self.placed.lock().unwrap().clone()
    }
}

impl OrderPlacement for OrderDesk {
    fn place_order(&self, order: &Order) -> Result<OrderReceipt, PlacementError> {
        if self.offline {
            return Err(PlacementError::Unavailable("desk offline".to_string()));
        }
        self.placed.lock().unwrap().push(order.clone());
        Ok(OrderReceipt {
            order_id: order.id,
            accepted_at: Utc::now(),
            message: "queued".to_string(),
        })
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("checkout_flow=debug")
        .with_test_writer()
        .try_init();
}

fn fill(session: &mut CheckoutSession, scope: StepScope, fields: &[(&str, &str)]) {
    for (name, value) in fields {
        session.update_field(scope, name, *value).unwrap();
    }
}

fn fill_shipping(session: &mut CheckoutSession) {
    fill(
        session,
        StepScope::Shipping,
        &[
            ("fullName", "Katherine Johnson"),
            ("address1", "3 Orbit Lane"),
            ("city", "Hampton"),
            ("state", "VA"),
            ("postalCode", "23666"),
        ],
    );
}

fn fill_payment(session: &mut CheckoutSession) {
    fill(
        session,
        StepScope::Payment,
        &[
            ("cardNumber", "5555444433332222"),
            ("expiryDate", "03/28"),
            ("cvc", "4321"),
        ],
    );
}

#[test]
fn distinct_billing_flow_emits_billing_address() {
    init_tracing();
    let desk = OrderDesk::default();
    let mut session = CheckoutSession::new();

    fill_shipping(&mut session);
    assert_eq!(session.advance(), Ok(CheckoutStep::Billing));

    session
        .update_field(StepScope::Billing, "sameAsShipping", "false")
        .unwrap();
    let error = session.advance().unwrap_err();
    assert!(error
        .field_errors()
        .unwrap()
        .contains(StepScope::Billing, Field::BillingAddress));

    fill(
        &mut session,
        StepScope::Billing,
        &[
            ("fullName", "NASA Accounts"),
            ("address1", "1 Langley Blvd"),
            ("city", "Hampton"),
            ("state", "VA"),
            ("postalCode", "23681"),
            ("country", "USA"),
        ],
    );
    assert_eq!(session.advance(), Ok(CheckoutStep::Payment));

    fill_payment(&mut session);
    session.submit(&desk).unwrap();

    let placed = desk.placed();
    assert_eq!(placed.len(), 1);
    match &placed[0].billing {
        BillingSelection::DistinctAddress(address) => {
            assert_eq!(address.full_name, "NASA Accounts")
        }
        other => panic!("expected distinct billing, got {other:?}"),
    }
    assert_eq!(
        session.history().path(),
        vec![
            CheckoutStep::Shipping,
            CheckoutStep::Billing,
            CheckoutStep::Payment,
            CheckoutStep::Submitted,
        ]
    );
}

#[test]
fn toggling_checkbox_does_not_revalidate() {
    let mut session = CheckoutSession::new();
    fill_shipping(&mut session);
    session.advance().unwrap();

    session
        .update_field(StepScope::Billing, "sameAsShipping", "false")
        .unwrap();
    session.advance().unwrap_err();
    let errors_before = session.errors().clone();

    session
        .update_field(StepScope::Billing, "sameAsShipping", "true")
        .unwrap();
    assert_eq!(session.errors(), &errors_before);
    assert_eq!(session.step(), CheckoutStep::Billing);

    assert_eq!(session.advance(), Ok(CheckoutStep::Payment));
    assert!(session.errors().is_empty());
}

#[test]
fn navigation_back_and_forth_preserves_everything() {
    let mut session = CheckoutSession::new();
    fill_shipping(&mut session);
    session.advance().unwrap();
    session.advance().unwrap();
    fill_payment(&mut session);

    session.retreat().unwrap();
    session.retreat().unwrap();
    assert_eq!(
        session.field(StepScope::Shipping, "city").as_deref(),
        Some("Hampton")
    );
    session.advance().unwrap();
    session.advance().unwrap();

    assert_eq!(
        session.field(StepScope::Payment, "cvc").as_deref(),
        Some("4321")
    );
    assert_eq!(session.history().count(Trigger::Retreat), 2);
    assert_eq!(session.history().count(Trigger::Advance), 4);
}

#[tokio::test]
async fn effect_submission_runs_against_environment() {
    init_tracing();
    let desk = OrderDesk::default();
    let mut session = CheckoutSession::new();
    fill_shipping(&mut session);
    session.advance().unwrap();
    session.advance().unwrap();
    fill_payment(&mut session);

    let attempt = session.submission::<OrderDesk>().run(&desk).await;
    let receipt = session.apply_submission(attempt).unwrap();

    assert_eq!(receipt.message, "queued");
    assert_eq!(desk.placed().len(), 1);
    assert_eq!(session.step(), CheckoutStep::Submitted);
}

#[tokio::test]
async fn only_one_order_reaches_desk_per_checkout() {
    let desk = OrderDesk::default();
    let mut session = CheckoutSession::new();
    fill_shipping(&mut session);
    session.advance().unwrap();
    session.advance().unwrap();
    fill_payment(&mut session);

    // Both submissions are built before either result comes back.
    let first = session.submission::<OrderDesk>();
    let second = session.submission::<OrderDesk>();
    let first = first.run(&desk).await;
    let second = second.run(&desk).await;

    assert!(matches!(
        second,
        Err(CheckoutError::SubmissionInFlight { .. })
    ));
    assert_eq!(desk.placed().len(), 1);

    assert!(session.apply_submission(first).is_ok());
    assert!(session.apply_submission(second).is_err());
    assert_eq!(session.step(), CheckoutStep::Submitted);
    assert_eq!(session.history().count(Trigger::Submit), 1);
}

#[tokio::test]
async fn edit_during_placement_blocks_stale_order() {
    let desk = OrderDesk::default();
    let mut session = CheckoutSession::new();
    fill_shipping(&mut session);
    session.advance().unwrap();
    session.advance().unwrap();
    fill_payment(&mut session);

    let submission = session.submission::<OrderDesk>();
    session
        .update_field(StepScope::Payment, "cvc", "999")
        .unwrap();
    let attempt = submission.run(&desk).await;

    assert!(matches!(
        session.apply_submission(attempt),
        Err(CheckoutError::StaleOrder { .. })
    ));
    assert_eq!(session.step(), CheckoutStep::Payment);
    assert!(session.order().is_none());
}

#[tokio::test]
async fn unavailable_placement_keeps_session_on_payment() {
    let desk = OrderDesk {
        offline: true,
        ..OrderDesk::default()
    };
    let mut session = CheckoutSession::new();
    fill_shipping(&mut session);
    session.advance().unwrap();
    session.advance().unwrap();
    fill_payment(&mut session);

    let attempt = session.submission::<OrderDesk>().run(&desk).await;
    let error = session.apply_submission(attempt).unwrap_err();

    assert!(matches!(
        error,
        CheckoutError::Placement(PlacementError::Unavailable(_))
    ));
    assert_eq!(session.step(), CheckoutStep::Payment);

    // Desk comes back; the same session can submit again.
    let desk = OrderDesk::default();
    session.submit(&desk).unwrap();
    assert_eq!(desk.placed().len(), 1);
}

#[tokio::test]
async fn effect_submission_with_invalid_payment_never_reaches_desk() {
    let desk = OrderDesk::default();
    let mut session = CheckoutSession::new();
    fill_shipping(&mut session);
    session.advance().unwrap();
    session.advance().unwrap();
    session
        .update_field(StepScope::Payment, "cardNumber", "123")
        .unwrap();

    let attempt = session.submission::<OrderDesk>().run(&desk).await;
    assert!(session.apply_submission(attempt).is_err());

    assert!(desk.placed().is_empty());
    assert_eq!(session.errors().for_scope(StepScope::Payment).count(), 3);
}

#[test]
fn snapshot_hands_off_mid_flow() {
    let mut session = CheckoutSession::new();
    fill_shipping(&mut session);
    session.advance().unwrap();
    session
        .update_field(StepScope::Billing, "sameAsShipping", "false")
        .unwrap();
    session.advance().unwrap_err();

    let json = session.snapshot().to_json().unwrap();
    let restored = CheckoutSession::restore(SessionSnapshot::from_json(&json).unwrap()).unwrap();

    assert_eq!(restored.step(), CheckoutStep::Billing);
    assert_eq!(restored.errors(), session.errors());
    assert_eq!(
        restored.draft().shipping.get(AddressField::FullName),
        "Katherine Johnson"
    );
}
