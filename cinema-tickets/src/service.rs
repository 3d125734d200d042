//! The ticket purchase flow.
//!
//! [`TicketServiceImpl`] validates a purchase, prices it, and only then
//! reserves seats and takes payment. A rejected or unpriceable purchase never
//! reaches either collaborator.

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use crate::config::TicketServiceConfig;
use crate::errors::PurchaseError;
use crate::pricing::total_seats;
use crate::services::{SeatReservationService, TicketPaymentService};
use crate::types::{PurchaseId, PurchaseReceipt, TicketTypeRequest};
use crate::validation::validate_purchase;

/// Purchases cinema tickets on behalf of an account.
pub trait TicketService {
    /// Validates and prices the requests, then reserves seats and takes
    /// payment, in that order.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::InvalidPurchase`] if any purchase rule is broken;
    ///   no collaborator is called.
    /// - [`PurchaseError::Pricing`] if the pricing table cannot price the
    ///   purchase; no collaborator is called.
    /// - [`PurchaseError::SeatReservation`] if reserving seats fails; payment
    ///   is not attempted.
    /// - [`PurchaseError::Payment`] if payment fails.
    fn purchase_tickets(
        &self,
        account_id: Option<i64>,
        ticket_type_requests: &[TicketTypeRequest],
    ) -> Result<PurchaseReceipt, PurchaseError>;
}

/// Default [`TicketService`] backed by injected collaborators.
///
/// Holds no mutable state, so one instance can serve concurrent purchases
/// whenever its collaborators can.
#[derive(Debug, Clone)]
pub struct TicketServiceImpl<P, R> {
    ticket_payment_service: P,
    seat_reservation_service: R,
    config: TicketServiceConfig,
}

impl<P, R> TicketServiceImpl<P, R> {
    /// Creates a service with standard prices and the default ticket ceiling.
    pub fn new(ticket_payment_service: P, seat_reservation_service: R) -> Self {
        Self::with_config(
            ticket_payment_service,
            seat_reservation_service,
            TicketServiceConfig::default(),
        )
    }

    /// Creates a service with an explicit configuration.
    pub const fn with_config(
        ticket_payment_service: P,
        seat_reservation_service: R,
        config: TicketServiceConfig,
    ) -> Self {
        Self {
            ticket_payment_service,
            seat_reservation_service,
            config,
        }
    }

    /// The configuration this service was built with.
    pub const fn config(&self) -> &TicketServiceConfig {
        &self.config
    }
}

impl<P, R> TicketService for TicketServiceImpl<P, R>
where
    P: TicketPaymentService,
    R: SeatReservationService,
{
    #[instrument(
        skip(self, ticket_type_requests),
        fields(request_count = ticket_type_requests.len())
    )]
    fn purchase_tickets(
        &self,
        account_id: Option<i64>,
        ticket_type_requests: &[TicketTypeRequest],
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let purchase = validate_purchase(
            account_id,
            ticket_type_requests,
            self.config.max_tickets_per_purchase,
        )
        .inspect_err(|reason| warn!(%reason, "Purchase rejected"))?;

        let total_seats = total_seats(&purchase);
        let total_amount = self
            .config
            .pricing
            .total_amount(&purchase)
            .inspect_err(|e| error!(error = %e, "Pricing table could not price a validated purchase"))?;
        debug!(total_seats, total_amount, "Derived purchase totals");

        let account_id = purchase.account_id();

        self.seat_reservation_service
            .reserve_seat(account_id, total_seats)
            .map_err(|e| {
                error!(%account_id, total_seats, error = %e, "Seat reservation failed");
                PurchaseError::SeatReservation(e)
            })?;

        self.ticket_payment_service
            .make_payment(account_id, total_amount)
            .map_err(|e| {
                error!(%account_id, total_amount, error = %e, "Payment failed after seats were reserved");
                PurchaseError::Payment(e)
            })?;

        let receipt = PurchaseReceipt {
            purchase_id: PurchaseId::new(),
            account_id,
            total_seats,
            total_amount,
            purchased_at: Utc::now(),
        };

        info!(
            purchase_id = %receipt.purchase_id,
            %account_id,
            total_seats,
            total_amount,
            "Tickets purchased"
        );

        Ok(receipt)
    }
}
