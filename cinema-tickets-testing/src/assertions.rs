//! Assertions over recorded collaborator calls.

use crate::recording::{CallLog, CollaboratorCall};

/// Asserts that neither collaborator was called.
///
/// # Panics
/// Panics if the log holds any call.
///
/// # Example
/// ```rust,ignore
/// let (log, payments, reservations) = recording_collaborators();
/// let service = TicketServiceImpl::new(payments, reservations);
///
/// assert!(service.purchase_tickets(None, &requests).is_err());
/// assert_no_side_effects(&log);
/// ```
pub fn assert_no_side_effects(log: &CallLog) {
    let calls = log.calls();
    assert!(
        calls.is_empty(),
        "Expected no collaborator calls, got {calls:?}"
    );
}

/// Asserts that exactly one seat reservation was made, followed by exactly one
/// payment, both for `account_id` and with the given totals.
///
/// # Panics
/// Panics if the log holds anything other than that pair of calls in that
/// order.
pub fn assert_reserved_then_paid(log: &CallLog, account_id: i64, seats: u32, amount: u64) {
    assert_eq!(
        log.calls(),
        vec![
            CollaboratorCall::ReserveSeat { account_id, seats },
            CollaboratorCall::MakePayment { account_id, amount },
        ],
        "Expected a reservation of {seats} seats then a payment of {amount} for account {account_id}"
    );
}
