//! Box office example application
//!
//! Buys cinema tickets from the command line against in-memory seat
//! reservation and payment services, then prints the receipt.
//!
//! ```text
//! box_office 1 ADULT=2 CHILD=1
//! CINEMA_PRICE_ADULT=30 box_office 1 ADULT=2
//! ```

use anyhow::Result;
use cinema_tickets::{TicketService, TicketServiceImpl};
use cinema_tickets_examples::box_office::{config_from_env, parse_args, DEFAULT_LOG_FILTER};
use cinema_tickets_memory::{InMemoryPaymentService, InMemorySeatReservationService};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = config_from_env()?;

    let payments = InMemoryPaymentService::new();
    let reservations = InMemorySeatReservationService::new();
    let service = TicketServiceImpl::with_config(payments.clone(), reservations.clone(), config);
    info!(
        max_tickets = %service.config().max_tickets_per_purchase,
        "Starting box office"
    );

    let receipt = service.purchase_tickets(Some(args.account_id), &args.requests)?;

    println!("{receipt}");
    println!("{}", serde_json::to_string_pretty(&receipt)?);

    info!(
        paid = payments.total_paid(receipt.account_id),
        reserved = reservations.reserved_seats(receipt.account_id),
        "Account totals"
    );

    Ok(())
}
