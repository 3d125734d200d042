//! Core types for cinema ticket purchases.
//!
//! Raw input ([`TicketTypeRequest`], an optional account number) is kept
//! deliberately loose so that every malformed purchase can be represented and
//! rejected with a precise reason. Validation parses that input into
//! [`ValidatedPurchase`], and everything downstream of validation works only
//! with the parsed types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The kind of ticket being purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    /// Full price ticket; the only type that may be purchased on its own.
    Adult,
    /// Reduced price ticket with a seat.
    Child,
    /// Free ticket; infants sit on an adult's lap and take no seat.
    Infant,
}

impl TicketType {
    /// Every ticket type, in pricing-table order.
    pub const ALL: [Self; 3] = [Self::Adult, Self::Child, Self::Infant];

    /// Whether a ticket of this type needs a reserved seat.
    pub const fn occupies_seat(self) -> bool {
        !matches!(self, Self::Infant)
    }

    /// Whether this ticket type must be accompanied by an adult.
    pub const fn is_minor(self) -> bool {
        matches!(self, Self::Child | Self::Infant)
    }

    /// The canonical upper-case name of the ticket type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Child => "CHILD",
            Self::Infant => "INFANT",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`TicketType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ticket type: {0:?}")]
pub struct ParseTicketTypeError(String);

impl FromStr for TicketType {
    type Err = ParseTicketTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ticket_type| ticket_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTicketTypeError(s.to_string()))
    }
}

/// A single line item of a purchase, exactly as submitted.
///
/// The type is optional and the count is signed: a request with no type or a
/// negative count is representable so that validation can reject it with a
/// specific reason instead of failing at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketTypeRequest {
    ticket_type: Option<TicketType>,
    no_of_tickets: i32,
}

impl TicketTypeRequest {
    /// Creates a request for `no_of_tickets` tickets of `ticket_type`.
    pub const fn new(ticket_type: TicketType, no_of_tickets: i32) -> Self {
        Self {
            ticket_type: Some(ticket_type),
            no_of_tickets,
        }
    }

    /// Creates a request whose ticket type was not supplied.
    pub const fn untyped(no_of_tickets: i32) -> Self {
        Self {
            ticket_type: None,
            no_of_tickets,
        }
    }

    /// The requested ticket type, if one was supplied.
    pub const fn ticket_type(&self) -> Option<TicketType> {
        self.ticket_type
    }

    /// The requested number of tickets.
    pub const fn no_of_tickets(&self) -> i32 {
        self.no_of_tickets
    }
}

/// Identifier of the account a purchase is made for.
///
/// `AccountId` values are always strictly positive.
#[nutype(
    validate(greater = 0),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Display,
        Into,
        Serialize,
        Deserialize
    )
)]
pub struct AccountId(i64);

/// Unique identifier of a completed purchase.
///
/// Purchase ids are UUIDv7, so ids minted later sort after earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(Uuid);

impl PurchaseId {
    /// Mints a new purchase id from the current time.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PurchaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ticket line that has passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketLine {
    /// The ticket type.
    pub ticket_type: TicketType,
    /// The number of tickets of this type on this line.
    pub count: u32,
}

/// A purchase that satisfies every purchase rule.
///
/// Only [`crate::validation::validate_purchase`] produces this type, so
/// holding one is proof that the account is valid, the lines are well
/// formed, the ceiling is respected and any minors are accompanied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPurchase {
    account_id: AccountId,
    lines: Vec<TicketLine>,
}

impl ValidatedPurchase {
    pub(crate) const fn new(account_id: AccountId, lines: Vec<TicketLine>) -> Self {
        Self { account_id, lines }
    }

    /// The account the purchase is for.
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// The validated lines, in submission order.
    pub fn lines(&self) -> &[TicketLine] {
        &self.lines
    }

    /// Total number of tickets of `ticket_type` across all lines.
    pub fn count_of(&self, ticket_type: TicketType) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.ticket_type == ticket_type)
            .map(|line| line.count)
            .sum()
    }

    /// Total number of tickets across all lines.
    pub fn total_tickets(&self) -> u32 {
        self.lines.iter().map(|line| line.count).sum()
    }
}

/// Currency symbol printed before amounts in receipts.
pub const CURRENCY_SYMBOL: char = '£';

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Identifier of this purchase.
    pub purchase_id: PurchaseId,
    /// The account that was charged.
    pub account_id: AccountId,
    /// Number of seats reserved.
    pub total_seats: u32,
    /// Amount paid, in whole currency units.
    pub total_amount: u64,
    /// When the purchase completed.
    pub purchased_at: DateTime<Utc>,
}

impl fmt::Display for PurchaseReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tickets purchased [Account ID: {}, Number of Seats: {}, Total amount: {CURRENCY_SYMBOL}{}].",
            self.account_id, self.total_seats, self.total_amount
        )
    }
}
