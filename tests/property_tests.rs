//! Property-based tests for the checkout session and validators.
//!
//! These tests use proptest to verify the flow rules hold across many
//! randomly generated drafts.

use checkout_flow::cart::{Cart, CartItem};
use checkout_flow::machine::{CheckoutError, CheckoutSession, CheckoutStep};
use checkout_flow::model::{
    Address, AddressField, CheckoutDraft, FieldUpdate, PaymentDetails, PaymentField, StepScope,
};
use checkout_flow::placement::AcknowledgingPlacement;
use checkout_flow::validation::{into_result, validate_address, validate_draft, validate_payment};
use proptest::prelude::*;
use rust_decimal::Decimal;

prop_compose! {
    fn valid_address()(
        full_name in "[A-Za-z][A-Za-z .'-]{0,30}[A-Za-z]",
        address1 in "[0-9A-Za-z]{5,40}",
        address2 in proptest::option::of("[0-9A-Za-z #]{1,20}"),
        city in "[A-Za-z]{2,20}",
        state in "[A-Za-z]{2,20}",
        postal_code in "[0-9A-Z]{5,10}",
        country in "[A-Z]{2,3}",
    ) -> Address {
        Address { full_name, address1, address2, city, state, postal_code, country }
    }
}

prop_compose! {
    fn any_address()(
        full_name in ".{0,8}",
        address1 in ".{0,8}",
        city in ".{0,8}",
        state in ".{0,8}",
        postal_code in ".{0,8}",
        country in ".{0,8}",
    ) -> Address {
        Address { full_name, address1, address2: None, city, state, postal_code, country }
    }
}

prop_compose! {
    fn any_payment()(
        card_number in "[0-9]{0,20}",
        expiry_date in "[0-9/]{0,6}",
        cvc in "[0-9]{0,5}",
    ) -> PaymentDetails {
        PaymentDetails { card_number, expiry_date, cvc }
    }
}

fn address_field() -> impl Strategy<Value = AddressField> {
    proptest::sample::select(AddressField::ALL.to_vec())
}

fn payment_field() -> impl Strategy<Value = PaymentField> {
    proptest::sample::select(PaymentField::ALL.to_vec())
}

fn session_on_billing(shipping: Address, draft: CheckoutDraft) -> CheckoutSession {
    let mut session = CheckoutSession::builder()
        .draft(CheckoutDraft { shipping, ..draft })
        .build();
    session.advance().expect("valid shipping advances");
    session
}

proptest! {
    #[test]
    fn min_length_shipping_advances_to_billing(shipping in valid_address()) {
        let mut session = CheckoutSession::builder()
            .draft(CheckoutDraft { shipping, ..CheckoutDraft::default() })
            .build();

        prop_assert_eq!(session.advance(), Ok(CheckoutStep::Billing));
        prop_assert!(session.errors().is_empty());
    }

    #[test]
    fn same_as_shipping_always_reaches_payment(
        shipping in valid_address(),
        billing in proptest::option::of(any_address()),
    ) {
        let mut session = session_on_billing(
            shipping,
            CheckoutDraft { same_as_shipping: true, billing, ..CheckoutDraft::default() },
        );

        prop_assert_eq!(session.advance(), Ok(CheckoutStep::Payment));
    }

    #[test]
    fn distinct_billing_absent_never_advances(shipping in valid_address()) {
        let mut session = session_on_billing(
            shipping,
            CheckoutDraft { same_as_shipping: false, billing: None, ..CheckoutDraft::default() },
        );

        let result = session.advance();
        prop_assert!(matches!(result, Err(CheckoutError::InvalidFields(_))));
        prop_assert_eq!(session.step(), CheckoutStep::Billing);
    }

    #[test]
    fn distinct_billing_advances_iff_valid(
        shipping in valid_address(),
        billing in prop_oneof![valid_address(), any_address()],
    ) {
        let expected_ok = into_result(validate_address(&billing, StepScope::Billing)).is_ok();
        let mut session = session_on_billing(
            shipping,
            CheckoutDraft { same_as_shipping: false, billing: Some(billing), ..CheckoutDraft::default() },
        );

        let result = session.advance();
        prop_assert_eq!(result.is_ok(), expected_ok);
        let expected_step = if expected_ok { CheckoutStep::Payment } else { CheckoutStep::Billing };
        prop_assert_eq!(session.step(), expected_step);
    }

    #[test]
    fn retreat_from_payment_keeps_payment(
        shipping in valid_address(),
        payment in any_payment(),
    ) {
        let mut session = session_on_billing(shipping, CheckoutDraft::default());
        session.advance().unwrap();
        for field in PaymentField::ALL {
            session.update(FieldUpdate::Payment(field, payment.get(field).to_string()));
        }

        prop_assert_eq!(session.retreat(), Ok(CheckoutStep::Billing));
        prop_assert_eq!(session.advance(), Ok(CheckoutStep::Payment));
        prop_assert_eq!(&session.draft().payment, &payment);
    }

    #[test]
    fn submit_before_payment_never_transitions(
        shipping in valid_address(),
        on_billing in any::<bool>(),
    ) {
        let mut session = if on_billing {
            session_on_billing(shipping, CheckoutDraft::default())
        } else {
            CheckoutSession::builder()
                .draft(CheckoutDraft { shipping, ..CheckoutDraft::default() })
                .build()
        };
        let before = session.step();

        let result = session.submit(&AcknowledgingPlacement);
        prop_assert!(
            matches!(result, Err(CheckoutError::StepUnavailable { .. })),
            "unexpected result: {:?}",
            result
        );
        prop_assert_eq!(session.step(), before);
        prop_assert!(session.order().is_none());
    }

    #[test]
    fn address_fields_round_trip(
        scope in prop_oneof![Just(StepScope::Shipping), Just(StepScope::Billing)],
        field in address_field(),
        value in ".{0,40}",
    ) {
        let mut session = CheckoutSession::new();
        session.update_field(scope, field.name(), value.clone()).unwrap();

        prop_assert_eq!(session.field(scope, field.name()), Some(value));
        prop_assert_eq!(session.step(), CheckoutStep::Shipping);
    }

    #[test]
    fn payment_fields_round_trip(field in payment_field(), value in ".{0,40}") {
        let mut session = CheckoutSession::new();
        session.update_field(StepScope::Payment, field.name(), value.clone()).unwrap();

        prop_assert_eq!(session.field(StepScope::Payment, field.name()), Some(value));
    }

    #[test]
    fn same_as_shipping_flag_round_trips(flag in any::<bool>()) {
        let mut session = CheckoutSession::new();
        session.update_field(StepScope::Billing, "sameAsShipping", flag.to_string()).unwrap();

        prop_assert_eq!(session.draft().same_as_shipping, flag);
        prop_assert_eq!(session.field(StepScope::Billing, "sameAsShipping"), Some(flag.to_string()));
    }

    #[test]
    fn well_formed_payment_is_accepted(
        card_number in "[0-9]{16}",
        month in 1u8..=12,
        year in 0u8..100,
        cvc in "[0-9]{3,4}",
    ) {
        let payment = PaymentDetails {
            card_number,
            expiry_date: format!("{month:02}/{year:02}"),
            cvc,
        };
        prop_assert!(validate_payment(&payment).is_success());
    }

    #[test]
    fn wrong_length_card_number_is_rejected(card_number in "[0-9]{0,15}|[0-9]{17,20}") {
        let payment = PaymentDetails {
            card_number,
            expiry_date: "12/29".to_string(),
            cvc: "123".to_string(),
        };
        prop_assert!(validate_payment(&payment).is_failure());
    }

    #[test]
    fn draft_validation_is_deterministic(
        shipping in any_address(),
        payment in any_payment(),
        same in any::<bool>(),
    ) {
        let draft = CheckoutDraft {
            shipping,
            same_as_shipping: same,
            billing: None,
            payment,
        };
        prop_assert_eq!(into_result(validate_draft(&draft)), into_result(validate_draft(&draft)));
    }

    #[test]
    fn cart_subtotal_is_sum_of_lines(
        lines in prop::collection::vec((1u32..10_000, 1u32..50), 0..8)
    ) {
        let mut cart = Cart::new();
        let mut expected = Decimal::ZERO;
        for (id, (cents, quantity)) in lines.iter().enumerate() {
            let unit_price = Decimal::new(i64::from(*cents), 2);
            expected += unit_price * Decimal::from(*quantity);
            cart.add(CartItem {
                id: id as u32,
                name: format!("item {id}"),
                unit_price,
                quantity: *quantity,
            });
        }

        prop_assert_eq!(cart.subtotal(), expected);
        prop_assert_eq!(cart.item_count(), lines.iter().map(|(_, q)| q).sum::<u32>());
    }
}

#[test]
fn reference_payment_examples() {
    let valid = PaymentDetails {
        card_number: "1234567890123456".to_string(),
        expiry_date: "12/29".to_string(),
        cvc: "123".to_string(),
    };
    assert!(validate_payment(&valid).is_success());

    for invalid in [
        PaymentDetails {
            card_number: "123".to_string(),
            ..valid.clone()
        },
        PaymentDetails {
            expiry_date: "13/29".to_string(),
            ..valid.clone()
        },
        PaymentDetails {
            cvc: "12".to_string(),
            ..valid.clone()
        },
    ] {
        assert!(validate_payment(&invalid).is_failure(), "{invalid:?}");
    }
}
