//! Property test generators for purchase requests.
//!
//! Generators named `arb_valid_*` only produce input that passes every purchase
//! rule under the default ceiling of 25 tickets. The rest produce arbitrary or
//! deliberately broken input.

use cinema_tickets::{PricingTable, TicketType, TicketTypeRequest};
use proptest::prelude::*;

/// Default per-purchase ceiling the `arb_valid_*` generators stay within.
pub const DEFAULT_MAX_TICKETS: u32 = 25;

/// Generates any [`TicketType`].
pub fn arb_ticket_type() -> impl Strategy<Value = TicketType> {
    prop_oneof![
        Just(TicketType::Adult),
        Just(TicketType::Child),
        Just(TicketType::Infant),
    ]
}

/// Generates a typed request with a count between 0 and the default ceiling.
pub fn arb_ticket_request() -> impl Strategy<Value = TicketTypeRequest> {
    (arb_ticket_type(), 0..=25_i32)
        .prop_map(|(ticket_type, count)| TicketTypeRequest::new(ticket_type, count))
}

/// Generates any request, including untyped requests and negative counts.
pub fn arb_any_ticket_request() -> impl Strategy<Value = TicketTypeRequest> {
    (prop::option::of(arb_ticket_type()), -5..=30_i32).prop_map(|(ticket_type, count)| {
        ticket_type.map_or_else(
            || TicketTypeRequest::untyped(count),
            |ticket_type| TicketTypeRequest::new(ticket_type, count),
        )
    })
}

/// Generates a request that on its own breaks a purchase rule: either a
/// negative count or a missing ticket type.
pub fn arb_violating_request() -> impl Strategy<Value = TicketTypeRequest> {
    prop_oneof![
        (arb_ticket_type(), i32::MIN..0).prop_map(|(ticket_type, count)| {
            TicketTypeRequest::new(ticket_type, count)
        }),
        (0..=25_i32).prop_map(TicketTypeRequest::untyped),
    ]
}

/// Generates a strictly positive account number.
pub fn arb_valid_account_id() -> impl Strategy<Value = i64> {
    1..=i64::MAX
}

/// Generates a missing, zero or negative account number.
pub fn arb_invalid_account_id() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![Just(None), Just(Some(0)), (i64::MIN..=0).prop_map(Some)]
}

/// Generates request lists that pass every purchase rule.
///
/// There is always at least one adult, the combined count never exceeds
/// [`DEFAULT_MAX_TICKETS`], and the lines arrive in random order.
pub fn arb_valid_requests() -> impl Strategy<Value = Vec<TicketTypeRequest>> {
    (1..=DEFAULT_MAX_TICKETS)
        .prop_flat_map(|adults| (Just(adults), 0..=DEFAULT_MAX_TICKETS - adults))
        .prop_flat_map(|(adults, minors)| (Just(adults), Just(minors), 0..=minors))
        .prop_map(|(adults, minors, children)| {
            let infants = minors - children;
            [
                (TicketType::Adult, adults),
                (TicketType::Child, children),
                (TicketType::Infant, infants),
            ]
            .into_iter()
            .filter(|&(ticket_type, count)| ticket_type == TicketType::Adult || count > 0)
            .filter_map(|(ticket_type, count)| {
                i32::try_from(count)
                    .ok()
                    .map(|count| TicketTypeRequest::new(ticket_type, count))
            })
            .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

/// Generates request lists of 0 to 8 arbitrary requests.
pub fn arb_any_requests() -> impl Strategy<Value = Vec<TicketTypeRequest>> {
    prop::collection::vec(arb_any_ticket_request(), 0..=8)
}

/// Generates a pricing table with an entry for every ticket type.
pub fn arb_pricing_table() -> impl Strategy<Value = PricingTable> {
    (0..=100_u32, 0..=100_u32, 0..=100_u32).prop_map(|(adult, child, infant)| {
        PricingTable::from_prices([
            (TicketType::Adult, adult),
            (TicketType::Child, child),
            (TicketType::Infant, infant),
        ])
    })
}
