//! Purchase rule validation.
//!
//! [`validate_purchase`] turns a raw account number and raw ticket requests
//! into a [`ValidatedPurchase`], or reports the first rule the input breaks.
//! Rules are checked in a fixed order so that the reported reason is
//! deterministic:
//!
//! 1. the account id is present and positive
//! 2. at least one ticket request is present
//! 3. no request has a negative count
//! 4. every request names a ticket type
//! 5. the combined count does not exceed the ceiling
//! 6. child and infant tickets are accompanied by at least one adult ticket

use crate::config::MaxTicketsPerPurchase;
use crate::errors::InvalidPurchase;
use crate::types::{AccountId, TicketLine, TicketType, TicketTypeRequest, ValidatedPurchase};

/// Validates a purchase request, short-circuiting on the first broken rule.
pub fn validate_purchase(
    account_id: Option<i64>,
    requests: &[TicketTypeRequest],
    max_tickets: MaxTicketsPerPurchase,
) -> Result<ValidatedPurchase, InvalidPurchase> {
    let account_id = validate_account_id(account_id)?;

    if requests.is_empty() {
        return Err(InvalidPurchase::NoTicketRequests);
    }

    if let Some(request) = requests.iter().find(|r| r.no_of_tickets() < 0) {
        return Err(InvalidPurchase::NegativeTicketCount {
            count: request.no_of_tickets(),
        });
    }

    let lines = requests
        .iter()
        .map(to_ticket_line)
        .collect::<Option<Vec<_>>>()
        .ok_or(InvalidPurchase::MissingTicketType)?;

    // Summed from the raw i32 counts so the ceiling check cannot overflow.
    let requested: i64 = requests
        .iter()
        .map(|r| i64::from(r.no_of_tickets()))
        .sum();
    let max: u32 = max_tickets.into_inner();
    if requested > i64::from(max) {
        return Err(InvalidPurchase::TooManyTickets { requested, max });
    }

    let purchase = ValidatedPurchase::new(account_id, lines);

    let minors: u32 = purchase
        .lines()
        .iter()
        .filter(|line| line.ticket_type.is_minor())
        .map(|line| line.count)
        .sum();
    if minors > 0 && purchase.count_of(TicketType::Adult) == 0 {
        return Err(InvalidPurchase::UnaccompaniedMinors);
    }

    Ok(purchase)
}

/// Parses the raw account number into an [`AccountId`].
pub fn validate_account_id(account_id: Option<i64>) -> Result<AccountId, InvalidPurchase> {
    account_id
        .and_then(|id| AccountId::try_new(id).ok())
        .ok_or(InvalidPurchase::InvalidAccount { account_id })
}

fn to_ticket_line(request: &TicketTypeRequest) -> Option<TicketLine> {
    let ticket_type = request.ticket_type()?;
    let count = u32::try_from(request.no_of_tickets()).ok()?;
    Some(TicketLine { ticket_type, count })
}
