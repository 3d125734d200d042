//! Error types for cinema ticket purchases.
//!
//! Failures fall into three groups, and callers are expected to treat them
//! differently:
//!
//! - **InvalidPurchase**: the request broke a purchase rule. This is the only
//!   user-facing rejection and is always raised before any seat is reserved or
//!   any payment is taken.
//! - **PricingError**: the pricing table could not price a validated purchase.
//!   This indicates a configuration or logic defect, never bad input.
//! - **CollaboratorError**: the seat reservation or payment service failed.
//!   Its meaning belongs to the collaborator; it is passed through untouched.
//!
//! [`PurchaseError`] combines all three for the purchase operation.

use std::error::Error as StdError;
use std::fmt;

use crate::types::TicketType;
use thiserror::Error;

/// A purchase request broke one of the purchase rules.
///
/// Rules are checked in the order the variants are declared, and only the
/// first violation is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPurchase {
    /// The account id was missing, zero or negative.
    #[error("account with ID [{}] is invalid", display_account_id(.account_id.as_ref()))]
    InvalidAccount {
        /// The account id as submitted.
        account_id: Option<i64>,
    },

    /// No ticket requests were supplied.
    #[error("ticket requests must be provided and contain at least one request")]
    NoTicketRequests,

    /// A ticket request asked for a negative number of tickets.
    #[error("number of tickets cannot be negative (got {count})")]
    NegativeTicketCount {
        /// The offending count.
        count: i32,
    },

    /// A ticket request did not say which ticket type it was for.
    #[error("ticket type must be provided for every request")]
    MissingTicketType,

    /// More tickets were requested than a single purchase allows.
    #[error("only a maximum of {max} tickets can be purchased at a time (requested {requested})")]
    TooManyTickets {
        /// Combined count across all requests.
        requested: i64,
        /// The per-purchase ceiling.
        max: u32,
    },

    /// Child or infant tickets were requested without an adult ticket.
    #[error("requests containing CHILD or INFANT tickets must contain at least one ADULT ticket")]
    UnaccompaniedMinors,
}

fn display_account_id(account_id: Option<&i64>) -> String {
    account_id.map_or_else(|| "missing".to_string(), |id| id.to_string())
}

/// Pricing could not be completed for a validated purchase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The pricing table has no price for a ticket type that passed
    /// validation.
    #[error("unexpected ticket type [{0}]: no unit price configured")]
    UnexpectedTicketType(TicketType),
}

/// Opaque failure reported by a seat reservation or payment service.
///
/// The purchase core does not interpret collaborator failures; it only
/// carries them back to the caller. Display and source are forwarded to the
/// wrapped error.
#[derive(Debug)]
pub struct CollaboratorError(Box<dyn StdError + Send + Sync + 'static>);

impl CollaboratorError {
    /// Wraps an arbitrary error raised by a collaborator.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Box::new(error))
    }

    /// Creates a collaborator error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self(message.into())
    }

    /// The wrapped error, if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for CollaboratorError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Errors returned by [`crate::service::TicketService::purchase_tickets`].
#[derive(Debug, Error)]
pub enum PurchaseError {
    /// The request was rejected; no collaborator was called.
    #[error("invalid purchase: {0}")]
    InvalidPurchase(#[from] InvalidPurchase),

    /// The validated purchase could not be priced; no collaborator was
    /// called.
    #[error("pricing failed: {0}")]
    Pricing(#[from] PricingError),

    /// The seat reservation service failed; payment was not attempted.
    #[error("seat reservation failed")]
    SeatReservation(#[source] CollaboratorError),

    /// The payment service failed after seats were reserved.
    #[error("payment failed")]
    Payment(#[source] CollaboratorError),
}

impl PurchaseError {
    /// Whether this error is a rejection of the request itself.
    pub const fn is_invalid_purchase(&self) -> bool {
        matches!(self, Self::InvalidPurchase(_))
    }

    /// The rule violation, if this error is a rejection.
    pub const fn as_invalid_purchase(&self) -> Option<&InvalidPurchase> {
        match self {
            Self::InvalidPurchase(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Errors raised while building a [`crate::config::TicketServiceConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured ticket ceiling is outside the accepted range.
    #[error("invalid maximum tickets per purchase: {0}")]
    InvalidMaxTickets(u32),

    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
