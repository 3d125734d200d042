//! Service configuration read from environment variables.
//!
//! Every variable is optional. Unset variables keep the standard value.

use cinema_tickets::{
    ConfigError, PricingTable, TicketServiceConfig, TicketType, STANDARD_PRICES,
};
use thiserror::Error;

/// Ceiling on the combined ticket count of one purchase.
pub const MAX_TICKETS_VAR: &str = "CINEMA_MAX_TICKETS";
/// Unit price of an adult ticket.
pub const PRICE_ADULT_VAR: &str = "CINEMA_PRICE_ADULT";
/// Unit price of a child ticket.
pub const PRICE_CHILD_VAR: &str = "CINEMA_PRICE_CHILD";
/// Unit price of an infant ticket.
pub const PRICE_INFANT_VAR: &str = "CINEMA_PRICE_INFANT";

const PRICE_VARS: [(TicketType, &str); 3] = [
    (TicketType::Adult, PRICE_ADULT_VAR),
    (TicketType::Child, PRICE_CHILD_VAR),
    (TicketType::Infant, PRICE_INFANT_VAR),
];

/// A configuration variable could not be used.
#[derive(Debug, Error)]
pub enum EnvConfigError {
    /// The variable is set but is not a non-negative integer.
    #[error("{var} must be a non-negative integer, got {value:?}")]
    NotANumber {
        /// Variable name.
        var: &'static str,
        /// Value as found in the environment.
        value: String,
    },

    /// The value parsed but the service configuration rejected it.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Builds the service configuration from the process environment.
pub fn config_from_env() -> Result<TicketServiceConfig, EnvConfigError> {
    config_from_lookup(|var| std::env::var(var).ok())
}

/// Builds the service configuration, reading each variable through `lookup`.
pub fn config_from_lookup<F>(lookup: F) -> Result<TicketServiceConfig, EnvConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |var: &'static str| -> Result<Option<u32>, EnvConfigError> {
        lookup(var)
            .map(|value| {
                value
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| EnvConfigError::NotANumber { var, value })
            })
            .transpose()
    };

    let mut prices = Vec::from(STANDARD_PRICES);
    for (ticket_type, var) in PRICE_VARS {
        if let Some(price) = read(var)? {
            prices.push((ticket_type, price));
        }
    }

    let config = TicketServiceConfig::default().with_pricing(PricingTable::from_prices(prices));
    match read(MAX_TICKETS_VAR)? {
        Some(max) => Ok(config.with_max_tickets(max)?),
        None => Ok(config),
    }
}
