//! End-to-end purchase scenarios run against recording collaborators.

use cinema_tickets::{
    InvalidPurchase, PricingError, PricingTable, PurchaseError, TicketService,
    TicketServiceConfig, TicketServiceImpl, TicketType, TicketTypeRequest,
};
use cinema_tickets_testing::{
    assert_no_side_effects, assert_reserved_then_paid, recording_collaborators, CallLog,
    RecordingPaymentService, RecordingSeatReservation,
};

type RecordingService = TicketServiceImpl<RecordingPaymentService, RecordingSeatReservation>;

fn service() -> (CallLog, RecordingService) {
    let (log, payments, reservations) = recording_collaborators();
    (log, TicketServiceImpl::new(payments, reservations))
}

fn adult(count: i32) -> TicketTypeRequest {
    TicketTypeRequest::new(TicketType::Adult, count)
}

fn child(count: i32) -> TicketTypeRequest {
    TicketTypeRequest::new(TicketType::Child, count)
}

fn infant(count: i32) -> TicketTypeRequest {
    TicketTypeRequest::new(TicketType::Infant, count)
}

fn rejection(error: PurchaseError) -> InvalidPurchase {
    match error {
        PurchaseError::InvalidPurchase(reason) => reason,
        other => panic!("expected an invalid purchase, got {other:?}"),
    }
}

#[test]
fn adults_and_a_child_reserve_three_seats_and_pay_65() {
    let (log, service) = service();

    let receipt = service
        .purchase_tickets(Some(1), &[adult(2), child(1)])
        .unwrap();

    assert_reserved_then_paid(&log, 1, 3, 65);
    assert_eq!(
        receipt.to_string(),
        "Tickets purchased [Account ID: 1, Number of Seats: 3, Total amount: £65]."
    );
}

#[test]
fn invalid_accounts_are_rejected_without_side_effects() {
    for account_id in [Some(0), None, Some(-1)] {
        let (log, service) = service();

        let error = service
            .purchase_tickets(account_id, &[adult(1)])
            .unwrap_err();

        assert_eq!(rejection(error), InvalidPurchase::InvalidAccount { account_id });
        assert_no_side_effects(&log);
    }
}

#[test]
fn twenty_six_tickets_exceed_the_ceiling() {
    let (log, service) = service();

    let error = service
        .purchase_tickets(Some(1), &[adult(1), child(25)])
        .unwrap_err();

    assert_eq!(
        rejection(error),
        InvalidPurchase::TooManyTickets {
            requested: 26,
            max: 25
        }
    );
    assert_no_side_effects(&log);
}

#[test]
fn ceiling_applies_to_the_combined_total_across_types() {
    let (log, service) = service();

    let error = service
        .purchase_tickets(Some(1), &[adult(13), child(13)])
        .unwrap_err();

    assert!(matches!(
        rejection(error),
        InvalidPurchase::TooManyTickets { requested: 26, .. }
    ));
    assert_no_side_effects(&log);
}

#[test]
fn exactly_twenty_five_tickets_are_accepted() {
    let (log, service) = service();

    service
        .purchase_tickets(Some(1), &[adult(10), child(10), infant(5)])
        .unwrap();

    assert_reserved_then_paid(&log, 1, 20, 400);
}

#[test]
fn negative_count_is_rejected() {
    let (log, service) = service();

    let error = service
        .purchase_tickets(Some(1), &[adult(1), child(-1)])
        .unwrap_err();

    assert_eq!(
        rejection(error),
        InvalidPurchase::NegativeTicketCount { count: -1 }
    );
    assert_no_side_effects(&log);
}

#[test]
fn minors_without_an_adult_are_rejected() {
    for requests in [vec![child(1)], vec![infant(1)], vec![child(1), infant(1)]] {
        let (log, service) = service();

        let error = service.purchase_tickets(Some(1), &requests).unwrap_err();

        assert_eq!(rejection(error), InvalidPurchase::UnaccompaniedMinors);
        assert_no_side_effects(&log);
    }
}

#[test]
fn adult_line_with_zero_tickets_does_not_accompany_minors() {
    let (log, service) = service();

    let error = service
        .purchase_tickets(Some(1), &[adult(0), child(2)])
        .unwrap_err();

    assert_eq!(rejection(error), InvalidPurchase::UnaccompaniedMinors);
    assert_no_side_effects(&log);
}

#[test]
fn infants_take_no_seat_and_cost_nothing() {
    let (log, service) = service();

    service
        .purchase_tickets(Some(1), &[adult(2), child(2), infant(2)])
        .unwrap();

    assert_reserved_then_paid(&log, 1, 4, 80);
}

#[test]
fn empty_request_list_is_rejected() {
    let (log, service) = service();

    let error = service.purchase_tickets(Some(1), &[]).unwrap_err();

    assert_eq!(rejection(error), InvalidPurchase::NoTicketRequests);
    assert_no_side_effects(&log);
}

#[test]
fn untyped_request_is_rejected() {
    let (log, service) = service();

    let error = service
        .purchase_tickets(Some(1), &[adult(1), TicketTypeRequest::untyped(1)])
        .unwrap_err();

    assert_eq!(rejection(error), InvalidPurchase::MissingTicketType);
    assert_no_side_effects(&log);
}

#[test]
fn duplicate_ticket_types_are_summed() {
    let (log, service) = service();

    service
        .purchase_tickets(Some(7), &[adult(1), child(1), adult(2), child(1)])
        .unwrap();

    assert_reserved_then_paid(&log, 7, 5, 105);
}

#[test]
fn only_infants_with_an_adult_reserve_one_seat() {
    let (log, service) = service();

    service
        .purchase_tickets(Some(2), &[infant(3), adult(1)])
        .unwrap();

    assert_reserved_then_paid(&log, 2, 1, 25);
}

#[test]
fn account_is_checked_before_anything_else() {
    let (log, service) = service();

    let error = service.purchase_tickets(None, &[]).unwrap_err();

    assert_eq!(
        rejection(error),
        InvalidPurchase::InvalidAccount { account_id: None }
    );
    assert_no_side_effects(&log);
}

#[test]
fn configured_ceiling_replaces_the_default() {
    let (log, payments, reservations) = recording_collaborators();
    let config = TicketServiceConfig::default().with_max_tickets(4).unwrap();
    let service = TicketServiceImpl::with_config(payments, reservations, config);

    let error = service
        .purchase_tickets(Some(1), &[adult(3), child(2)])
        .unwrap_err();

    assert_eq!(
        rejection(error),
        InvalidPurchase::TooManyTickets {
            requested: 5,
            max: 4
        }
    );
    assert_no_side_effects(&log);
}

#[test]
fn configured_prices_are_charged() {
    let (log, payments, reservations) = recording_collaborators();
    let config = TicketServiceConfig::from_json(
        r#"{"pricing": {"ADULT": 30, "CHILD": 20, "INFANT": 5}}"#,
    )
    .unwrap();
    let service = TicketServiceImpl::with_config(payments, reservations, config);

    service
        .purchase_tickets(Some(1), &[adult(1), child(1), infant(1)])
        .unwrap();

    assert_reserved_then_paid(&log, 1, 2, 55);
}

#[test]
fn incomplete_pricing_table_is_a_defect_not_a_rejection() {
    let (log, payments, reservations) = recording_collaborators();
    let config = TicketServiceConfig::default().with_pricing(PricingTable::from_prices([
        (TicketType::Adult, 25),
        (TicketType::Child, 15),
    ]));
    let service = TicketServiceImpl::with_config(payments, reservations, config);

    let error = service
        .purchase_tickets(Some(1), &[adult(1), infant(1)])
        .unwrap_err();

    assert!(!error.is_invalid_purchase());
    assert!(matches!(
        error,
        PurchaseError::Pricing(PricingError::UnexpectedTicketType(TicketType::Infant))
    ));
    assert_no_side_effects(&log);
}
