//! Seat and price aggregation for validated purchases.
//!
//! Everything here is pure and order-independent. Pricing only accepts a
//! [`ValidatedPurchase`], so it never sees a negative count or a missing type.

use std::collections::BTreeMap;

use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::errors::PricingError;
use crate::types::{TicketType, ValidatedPurchase};

/// Price of a single ticket, in whole currency units.
#[nutype(derive(
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
))]
pub struct UnitPrice(u32);

/// Standard cinema prices.
pub const STANDARD_PRICES: [(TicketType, u32); 3] = [
    (TicketType::Adult, 25),
    (TicketType::Child, 15),
    (TicketType::Infant, 0),
];

/// Immutable mapping from ticket type to unit price.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingTable {
    prices: BTreeMap<TicketType, UnitPrice>,
}

impl PricingTable {
    /// The standard table: ADULT 25, CHILD 15, INFANT 0.
    pub fn standard() -> Self {
        Self::from_prices(STANDARD_PRICES)
    }

    /// Builds a table from `(ticket type, price)` pairs. Later pairs win.
    pub fn from_prices(prices: impl IntoIterator<Item = (TicketType, u32)>) -> Self {
        Self {
            prices: prices
                .into_iter()
                .map(|(ticket_type, price)| (ticket_type, UnitPrice::new(price)))
                .collect(),
        }
    }

    /// Unit price of `ticket_type`.
    ///
    /// Fails with [`PricingError::UnexpectedTicketType`] when the table has no
    /// entry for the type.
    pub fn unit_price(&self, ticket_type: TicketType) -> Result<UnitPrice, PricingError> {
        self.prices
            .get(&ticket_type)
            .copied()
            .ok_or(PricingError::UnexpectedTicketType(ticket_type))
    }

    /// Total payable amount for `purchase`: `count × unit price`, summed over
    /// every line.
    pub fn total_amount(&self, purchase: &ValidatedPurchase) -> Result<u64, PricingError> {
        purchase.lines().iter().try_fold(0_u64, |total, line| {
            let price: u32 = self.unit_price(line.ticket_type)?.into();
            Ok(total + u64::from(line.count) * u64::from(price))
        })
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Number of seats to reserve for `purchase`. Infants take no seat.
pub fn total_seats(purchase: &ValidatedPurchase) -> u32 {
    purchase
        .lines()
        .iter()
        .filter(|line| line.ticket_type.occupies_seat())
        .map(|line| line.count)
        .sum()
}
