//! Purchase configuration with type-safe validation.
//!
//! Configuration is assembled once at startup and never mutated afterwards.
//! The ticket ceiling is a `nutype` newtype, so an out-of-range ceiling cannot
//! be constructed, whether it comes from code or from a config document.

use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::pricing::PricingTable;

/// Maximum number of tickets, of all types combined, in one purchase.
///
/// Validated to be between 1 and 1000; defaults to 25.
#[nutype(
    validate(greater_or_equal = 1, less_or_equal = 1000),
    default = 25,
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Display,
        Default,
        Into,
        Serialize,
        Deserialize
    )
)]
pub struct MaxTicketsPerPurchase(u32);

/// Configuration for [`crate::service::TicketServiceImpl`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketServiceConfig {
    /// Unit price per ticket type.
    pub pricing: PricingTable,
    /// Ceiling on the combined ticket count of a purchase.
    pub max_tickets_per_purchase: MaxTicketsPerPurchase,
}

impl TicketServiceConfig {
    /// Parses a JSON configuration document. Missing fields take their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replaces the pricing table.
    #[must_use]
    pub fn with_pricing(mut self, pricing: PricingTable) -> Self {
        self.pricing = pricing;
        self
    }

    /// Replaces the ticket ceiling.
    pub fn with_max_tickets(mut self, max: u32) -> Result<Self, ConfigError> {
        self.max_tickets_per_purchase =
            MaxTicketsPerPurchase::try_new(max).map_err(|_| ConfigError::InvalidMaxTickets(max))?;
        Ok(self)
    }
}
