mod args;
mod env_config;

pub use args::{parse_args, parse_request, ArgsError, PurchaseArgs, USAGE};
pub use env_config::{
    config_from_env, config_from_lookup, EnvConfigError, MAX_TICKETS_VAR, PRICE_ADULT_VAR,
    PRICE_CHILD_VAR, PRICE_INFANT_VAR,
};

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "box_office=info,cinema_tickets=info";
