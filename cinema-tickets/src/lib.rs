//! Cinema Tickets - validation and pricing core for cinema ticket purchases
//!
//! A purchase names an account and a list of `{ticket type, count}` requests.
//! The core checks the purchase rules, derives the seats to reserve and the
//! amount to charge, and only then calls the injected seat reservation and
//! payment services. A purchase that breaks a rule never reaches either
//! service.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinema_tickets::{TicketService, TicketServiceImpl, TicketType, TicketTypeRequest};
//!
//! let service = TicketServiceImpl::new(payments, reservations);
//! let receipt = service.purchase_tickets(
//!     Some(1),
//!     &[
//!         TicketTypeRequest::new(TicketType::Adult, 2),
//!         TicketTypeRequest::new(TicketType::Child, 1),
//!     ],
//! )?;
//! assert_eq!(receipt.total_seats, 3);
//! assert_eq!(receipt.total_amount, 65);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod errors;
pub mod pricing;
pub mod service;
pub mod services;
pub mod types;
pub mod validation;

pub use config::{MaxTicketsPerPurchase, TicketServiceConfig};
pub use errors::{CollaboratorError, ConfigError, InvalidPurchase, PricingError, PurchaseError};
pub use pricing::{total_seats, PricingTable, UnitPrice, STANDARD_PRICES};
pub use service::{TicketService, TicketServiceImpl};
pub use services::{SeatReservationService, TicketPaymentService};
pub use types::{
    AccountId, ParseTicketTypeError, PurchaseId, PurchaseReceipt, TicketLine, TicketType,
    TicketTypeRequest, ValidatedPurchase, CURRENCY_SYMBOL,
};
pub use validation::{validate_account_id, validate_purchase};
