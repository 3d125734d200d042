//! In-memory collaborators for the `cinema-tickets` purchase core
//!
//! This crate provides in-memory implementations of the seat reservation and
//! payment service traits, useful for testing and development scenarios where
//! no real seat inventory or payment gateway is available. Both services keep
//! a running total per account and the full history of calls they accepted.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use cinema_tickets::{AccountId, CollaboratorError, SeatReservationService, TicketPaymentService};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// A lock guarding collaborator state was poisoned by a panicking writer.
#[derive(Debug, Error)]
#[error("{0} state lock poisoned")]
pub struct StatePoisoned(&'static str);

/// A running per-account total would exceed `u64::MAX`.
///
/// The call is refused and the ledger is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{ledger} total for account {account_id} would overflow")]
pub struct LedgerOverflow {
    /// Which ledger refused the call.
    pub ledger: &'static str,
    /// The account whose total would overflow.
    pub account_id: AccountId,
}

/// One accepted seat reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatReservation {
    /// Account the seats were reserved for.
    pub account_id: AccountId,
    /// Number of seats reserved.
    pub seats: u32,
}

/// One accepted payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Account that was charged.
    pub account_id: AccountId,
    /// Amount charged, in whole currency units.
    pub amount: u64,
}

#[derive(Debug)]
struct Ledger<T> {
    totals: HashMap<AccountId, u64>,
    history: Vec<T>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            totals: HashMap::new(),
            history: Vec::new(),
        }
    }
}

impl<T> Ledger<T> {
    fn record(
        &mut self,
        ledger: &'static str,
        account_id: AccountId,
        quantity: u64,
        entry: T,
    ) -> Result<u64, LedgerOverflow> {
        let total = self.totals.entry(account_id).or_insert(0);
        *total = total
            .checked_add(quantity)
            .ok_or(LedgerOverflow { ledger, account_id })?;
        let total = *total;
        self.history.push(entry);
        Ok(total)
    }
}

/// Thread-safe in-memory seat reservation service.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemorySeatReservationService {
    ledger: Arc<RwLock<Ledger<SeatReservation>>>,
}

impl InMemorySeatReservationService {
    /// Creates a service with no reservations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total seats reserved for `account_id` across all reservations.
    pub fn reserved_seats(&self, account_id: AccountId) -> u64 {
        let ledger = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        ledger.totals.get(&account_id).copied().unwrap_or(0)
    }

    /// Every reservation accepted so far, oldest first.
    pub fn reservations(&self) -> Vec<SeatReservation> {
        let ledger = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        ledger.history.clone()
    }
}

impl SeatReservationService for InMemorySeatReservationService {
    fn reserve_seat(
        &self,
        account_id: AccountId,
        total_seats_to_allocate: u32,
    ) -> Result<(), CollaboratorError> {
        let mut ledger = self
            .ledger
            .write()
            .map_err(|_| CollaboratorError::new(StatePoisoned("seat reservation")))?;

        let total = ledger.record(
            "seat reservation",
            account_id,
            u64::from(total_seats_to_allocate),
            SeatReservation {
                account_id,
                seats: total_seats_to_allocate,
            },
        )
        .map_err(CollaboratorError::new)?;
        drop(ledger);

        debug!(
            %account_id,
            seats = total_seats_to_allocate,
            total_reserved = total,
            "Seats reserved in memory"
        );
        Ok(())
    }
}

/// Thread-safe in-memory payment service.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentService {
    ledger: Arc<RwLock<Ledger<Payment>>>,
}

impl InMemoryPaymentService {
    /// Creates a service with no payments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total amount paid by `account_id` across all payments.
    pub fn total_paid(&self, account_id: AccountId) -> u64 {
        let ledger = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        ledger.totals.get(&account_id).copied().unwrap_or(0)
    }

    /// Every payment accepted so far, oldest first.
    pub fn payments(&self) -> Vec<Payment> {
        let ledger = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        ledger.history.clone()
    }
}

impl TicketPaymentService for InMemoryPaymentService {
    fn make_payment(
        &self,
        account_id: AccountId,
        total_amount_to_pay: u64,
    ) -> Result<(), CollaboratorError> {
        let mut ledger = self
            .ledger
            .write()
            .map_err(|_| CollaboratorError::new(StatePoisoned("payment")))?;

        let total = ledger.record(
            "payment",
            account_id,
            total_amount_to_pay,
            Payment {
                account_id,
                amount: total_amount_to_pay,
            },
        )
        .map_err(CollaboratorError::new)?;
        drop(ledger);

        debug!(
            %account_id,
            amount = total_amount_to_pay,
            total_paid = total,
            "Payment taken in memory"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_tickets::{TicketService, TicketServiceImpl, TicketType, TicketTypeRequest};
    use proptest::prelude::*;
    use std::thread;

    fn account(id: i64) -> AccountId {
        AccountId::try_new(id).unwrap()
    }

    #[test]
    fn new_services_are_empty() {
        let seats = InMemorySeatReservationService::new();
        let payments = InMemoryPaymentService::new();

        assert_eq!(seats.reserved_seats(account(1)), 0);
        assert!(seats.reservations().is_empty());
        assert_eq!(payments.total_paid(account(1)), 0);
        assert!(payments.payments().is_empty());
    }

    #[test]
    fn reservations_accumulate_per_account() {
        let seats = InMemorySeatReservationService::new();

        seats.reserve_seat(account(1), 3).unwrap();
        seats.reserve_seat(account(2), 5).unwrap();
        seats.reserve_seat(account(1), 2).unwrap();

        assert_eq!(seats.reserved_seats(account(1)), 5);
        assert_eq!(seats.reserved_seats(account(2)), 5);
        assert_eq!(
            seats.reservations(),
            vec![
                SeatReservation {
                    account_id: account(1),
                    seats: 3
                },
                SeatReservation {
                    account_id: account(2),
                    seats: 5
                },
                SeatReservation {
                    account_id: account(1),
                    seats: 2
                },
            ]
        );
    }

    #[test]
    fn payments_accumulate_per_account() {
        let payments = InMemoryPaymentService::new();

        payments.make_payment(account(4), 65).unwrap();
        payments.make_payment(account(4), 80).unwrap();

        assert_eq!(payments.total_paid(account(4)), 145);
        assert_eq!(payments.payments().len(), 2);
    }

    #[test]
    fn clones_share_state() {
        let payments = InMemoryPaymentService::new();
        let clone = payments.clone();

        clone.make_payment(account(1), 25).unwrap();

        assert_eq!(payments.total_paid(account(1)), 25);
    }

    #[test]
    fn drives_a_full_purchase() {
        let seats = InMemorySeatReservationService::new();
        let payments = InMemoryPaymentService::new();
        let service = TicketServiceImpl::new(payments.clone(), seats.clone());

        service
            .purchase_tickets(
                Some(1),
                &[
                    TicketTypeRequest::new(TicketType::Adult, 2),
                    TicketTypeRequest::new(TicketType::Child, 2),
                    TicketTypeRequest::new(TicketType::Infant, 2),
                ],
            )
            .unwrap();

        assert_eq!(seats.reserved_seats(account(1)), 4);
        assert_eq!(payments.total_paid(account(1)), 80);
    }

    #[test]
    fn concurrent_purchases_are_all_recorded() {
        let seats = InMemorySeatReservationService::new();
        let payments = InMemoryPaymentService::new();
        let service = Arc::new(TicketServiceImpl::new(payments.clone(), seats.clone()));

        let handles: Vec<_> = (1..=8)
            .map(|id| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    service
                        .purchase_tickets(Some(id), &[TicketTypeRequest::new(TicketType::Adult, 1)])
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            let _ = handle.join().unwrap();
        }

        assert_eq!(seats.reservations().len(), 8);
        assert_eq!(payments.payments().len(), 8);
        for id in 1..=8 {
            assert_eq!(payments.total_paid(account(id)), 25);
        }
    }

    #[test]
    fn overflowing_payment_is_refused_without_poisoning() {
        let payments = InMemoryPaymentService::new();

        payments.make_payment(account(1), u64::MAX).unwrap();
        let error = payments.make_payment(account(1), 1).unwrap_err();

        assert_eq!(
            error.downcast_ref::<LedgerOverflow>(),
            Some(&LedgerOverflow {
                ledger: "payment",
                account_id: account(1)
            })
        );
        assert_eq!(payments.total_paid(account(1)), u64::MAX);
        assert_eq!(payments.payments().len(), 1);

        payments.make_payment(account(1), 0).unwrap();
        payments.make_payment(account(2), 1).unwrap();
        assert_eq!(payments.total_paid(account(2)), 1);
    }

    #[test]
    fn overflowing_reservation_is_refused() {
        let seats = InMemorySeatReservationService::new();
        {
            let mut ledger = seats.ledger.write().unwrap();
            ledger.totals.insert(account(3), u64::MAX);
        }

        let error = seats.reserve_seat(account(3), 1).unwrap_err();

        assert_eq!(
            error.to_string(),
            "seat reservation total for account 3 would overflow"
        );
        assert!(seats.reservations().is_empty());
        seats.reserve_seat(account(4), 2).unwrap();
        assert_eq!(seats.reserved_seats(account(4)), 2);
    }

    proptest! {
        #[test]
        fn running_total_matches_history(amounts in prop::collection::vec(0_u64..1_000, 0..20)) {
            let payments = InMemoryPaymentService::new();
            for amount in &amounts {
                payments.make_payment(account(1), *amount).unwrap();
            }

            let from_history: u64 = payments.payments().iter().map(|p| p.amount).sum();
            prop_assert_eq!(payments.total_paid(account(1)), from_history);
            prop_assert_eq!(from_history, amounts.iter().sum::<u64>());
        }
    }
}
