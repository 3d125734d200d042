//! External collaborators invoked after a purchase is validated.
//!
//! Seat inventory and payment processing live outside this crate. They are
//! injected into [`crate::service::TicketServiceImpl`] through the two traits
//! below, so the purchase flow can be exercised against recording or in-memory
//! implementations.

use std::sync::Arc;

use crate::errors::CollaboratorError;
use crate::types::AccountId;

/// Reserves seats for an account.
pub trait SeatReservationService {
    /// Reserves `total_seats_to_allocate` seats for `account_id`.
    fn reserve_seat(
        &self,
        account_id: AccountId,
        total_seats_to_allocate: u32,
    ) -> Result<(), CollaboratorError>;
}

/// Takes payment from an account.
pub trait TicketPaymentService {
    /// Charges `total_amount_to_pay` to `account_id`.
    fn make_payment(
        &self,
        account_id: AccountId,
        total_amount_to_pay: u64,
    ) -> Result<(), CollaboratorError>;
}

impl<T> SeatReservationService for &T
where
    T: SeatReservationService + ?Sized,
{
    fn reserve_seat(
        &self,
        account_id: AccountId,
        total_seats_to_allocate: u32,
    ) -> Result<(), CollaboratorError> {
        (**self).reserve_seat(account_id, total_seats_to_allocate)
    }
}

impl<T> SeatReservationService for Arc<T>
where
    T: SeatReservationService + ?Sized,
{
    fn reserve_seat(
        &self,
        account_id: AccountId,
        total_seats_to_allocate: u32,
    ) -> Result<(), CollaboratorError> {
        (**self).reserve_seat(account_id, total_seats_to_allocate)
    }
}

impl<T> TicketPaymentService for &T
where
    T: TicketPaymentService + ?Sized,
{
    fn make_payment(
        &self,
        account_id: AccountId,
        total_amount_to_pay: u64,
    ) -> Result<(), CollaboratorError> {
        (**self).make_payment(account_id, total_amount_to_pay)
    }
}

impl<T> TicketPaymentService for Arc<T>
where
    T: TicketPaymentService + ?Sized,
{
    fn make_payment(
        &self,
        account_id: AccountId,
        total_amount_to_pay: u64,
    ) -> Result<(), CollaboratorError> {
        (**self).make_payment(account_id, total_amount_to_pay)
    }
}
