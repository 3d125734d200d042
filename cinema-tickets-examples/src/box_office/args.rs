//! Command line arguments: `<ACCOUNT_ID> <TYPE>=<COUNT>...`.

use cinema_tickets::{TicketType, TicketTypeRequest};
use thiserror::Error;

/// Usage line printed when the arguments cannot be parsed.
pub const USAGE: &str = "usage: box_office <ACCOUNT_ID> <TYPE>=<COUNT>...";

/// A purchase as read from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseArgs {
    /// The account number, passed to the core unchecked.
    pub account_id: i64,
    /// Ticket requests, in argument order.
    pub requests: Vec<TicketTypeRequest>,
}

/// Arguments that do not have the expected shape.
///
/// Only the shape is checked here. Values the shape allows, such as account
/// `0` or `ADULT=-1`, are left for the purchase core to reject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    /// No account id was given.
    #[error("missing account id\n{USAGE}")]
    MissingAccountId,

    /// The account id is not an integer.
    #[error("account id must be an integer, got {0:?}\n{USAGE}")]
    InvalidAccountId(String),

    /// A request token has no `=`.
    #[error("ticket request must look like TYPE=COUNT, got {0:?}\n{USAGE}")]
    MalformedRequest(String),

    /// The count of a request token is not an integer.
    #[error("ticket count must be an integer, got {0:?}\n{USAGE}")]
    InvalidCount(String),
}

/// Parses the arguments following the program name.
pub fn parse_args<I>(args: I) -> Result<PurchaseArgs, ArgsError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut args = args.into_iter();

    let account = args.next().ok_or(ArgsError::MissingAccountId)?;
    let account = account.as_ref().trim();
    let account_id = account
        .parse::<i64>()
        .map_err(|_| ArgsError::InvalidAccountId(account.to_string()))?;

    let requests = args
        .map(|token| parse_request(token.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PurchaseArgs {
        account_id,
        requests,
    })
}

/// Parses one `TYPE=COUNT` token.
///
/// An unrecognised type yields a request without a type.
pub fn parse_request(token: &str) -> Result<TicketTypeRequest, ArgsError> {
    let (ticket_type, count) = token
        .split_once('=')
        .ok_or_else(|| ArgsError::MalformedRequest(token.to_string()))?;

    let count = count.trim();
    let count = count
        .parse::<i32>()
        .map_err(|_| ArgsError::InvalidCount(count.to_string()))?;

    Ok(ticket_type.parse::<TicketType>().map_or_else(
        |_| TicketTypeRequest::untyped(count),
        |ticket_type| TicketTypeRequest::new(ticket_type, count),
    ))
}
