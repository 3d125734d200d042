//! Collaborators that record calls for test assertions.
//!
//! Both recording collaborators append to one shared [`CallLog`], so tests can
//! check not only which calls happened but also the order in which the seat
//! reservation and payment services were called.
//!
//! # Example
//!
//! ```ignore
//! let (log, payments, reservations) = recording_collaborators();
//! let service = TicketServiceImpl::new(payments, reservations);
//!
//! service.purchase_tickets(Some(1), &[TicketTypeRequest::new(TicketType::Adult, 2)])?;
//!
//! assert_eq!(
//!     log.calls(),
//!     vec![
//!         CollaboratorCall::ReserveSeat { account_id: 1, seats: 2 },
//!         CollaboratorCall::MakePayment { account_id: 1, amount: 50 },
//!     ]
//! );
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use cinema_tickets::{AccountId, CollaboratorError, SeatReservationService, TicketPaymentService};

/// A single call made to a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorCall {
    /// `reserve_seat(account_id, seats)` was called.
    ReserveSeat {
        /// Raw account number.
        account_id: i64,
        /// Seats requested.
        seats: u32,
    },
    /// `make_payment(account_id, amount)` was called.
    MakePayment {
        /// Raw account number.
        account_id: i64,
        /// Amount charged.
        amount: u64,
    },
}

/// Shared, thread-safe log of collaborator calls.
///
/// Cloning the log yields another handle to the same storage.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<CollaboratorCall>>>,
}

impl CallLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every call recorded so far, in call order.
    pub fn calls(&self) -> Vec<CollaboratorCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether no call has been recorded.
    pub fn is_empty(&self) -> bool {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Discards every recorded call.
    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, call: CollaboratorCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

/// Seat reservation service that records calls and always succeeds.
#[derive(Debug, Clone)]
pub struct RecordingSeatReservation {
    log: CallLog,
}

impl RecordingSeatReservation {
    /// Creates a recorder writing into `log`.
    pub const fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl SeatReservationService for RecordingSeatReservation {
    fn reserve_seat(
        &self,
        account_id: AccountId,
        total_seats_to_allocate: u32,
    ) -> Result<(), CollaboratorError> {
        self.log.push(CollaboratorCall::ReserveSeat {
            account_id: account_id.into_inner(),
            seats: total_seats_to_allocate,
        });
        Ok(())
    }
}

/// Payment service that records calls and always succeeds.
#[derive(Debug, Clone)]
pub struct RecordingPaymentService {
    log: CallLog,
}

impl RecordingPaymentService {
    /// Creates a recorder writing into `log`.
    pub const fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl TicketPaymentService for RecordingPaymentService {
    fn make_payment(
        &self,
        account_id: AccountId,
        total_amount_to_pay: u64,
    ) -> Result<(), CollaboratorError> {
        self.log.push(CollaboratorCall::MakePayment {
            account_id: account_id.into_inner(),
            amount: total_amount_to_pay,
        });
        Ok(())
    }
}

/// Creates a payment recorder and a seat recorder sharing one fresh log.
///
/// The returned order matches `TicketServiceImpl::new(payment, reservation)`.
pub fn recording_collaborators() -> (CallLog, RecordingPaymentService, RecordingSeatReservation) {
    let log = CallLog::new();
    (
        log.clone(),
        RecordingPaymentService::new(log.clone()),
        RecordingSeatReservation::new(log),
    )
}
