//! Failure injection for seat reservation and payment collaborators.
//!
//! [`ChaosCollaborator`] wraps any collaborator and, with a configured
//! probability, fails a call with [`InjectedFailure`] instead of forwarding it.
//! Injected failures are never forwarded, so a wrapped recorder only records
//! the calls that went through.

use std::sync::{Mutex, PoisonError};

use cinema_tickets::{AccountId, CollaboratorError, SeatReservationService, TicketPaymentService};
use nutype::nutype;
use rand::{random, rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;
use tracing::warn;

/// Probability value for failure injection rates.
///
/// Probability represents a value in the range [0.0, 1.0] where 0.0 means
/// never inject failures and 1.0 means always inject failures.
///
/// # Examples
///
/// ```ignore
/// use cinema_tickets_testing::chaos::Probability;
///
/// let sometimes = Probability::try_new(0.5).unwrap();
///
/// // Values outside [0.0, 1.0] are rejected
/// assert!(Probability::try_new(1.5).is_err());
/// assert!(Probability::try_new(-0.1).is_err());
/// ```
#[nutype(
    validate(greater_or_equal = 0.0, less_or_equal = 1.0),
    default = 0.0,
    derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Default, Into)
)]
pub struct Probability(f32);

/// The error a [`ChaosCollaborator`] returns when it injects a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("injected {operation} failure")]
pub struct InjectedFailure {
    /// The collaborator operation that was failed.
    pub operation: &'static str,
}

/// How often, and how reproducibly, failures are injected.
#[derive(Debug, Clone, Default)]
pub struct ChaosConfig {
    deterministic_seed: Option<u64>,
    failure_probability: Probability,
}

impl ChaosConfig {
    /// A configuration with a fixed seed, so runs are reproducible.
    pub fn deterministic() -> Self {
        Self {
            deterministic_seed: Some(0),
            ..Self::default()
        }
    }

    /// A configuration that fails every call.
    pub fn always_failing() -> Self {
        Self::deterministic().with_failure_probability(
            Probability::try_new(1.0).expect("1.0 is valid probability"),
        )
    }

    /// Sets the probability of failing each call.
    #[must_use]
    pub const fn with_failure_probability(mut self, probability: Probability) -> Self {
        self.failure_probability = probability;
        self
    }

    /// Uses `seed` for the failure RNG.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.deterministic_seed = Some(seed);
        self
    }
}

/// Extension trait for wrapping a collaborator in failure injection.
pub trait ChaosExt: Sized {
    /// Wraps `self` in a [`ChaosCollaborator`].
    fn with_chaos(self, config: ChaosConfig) -> ChaosCollaborator<Self>;
}

impl<S> ChaosExt for S {
    fn with_chaos(self, config: ChaosConfig) -> ChaosCollaborator<Self> {
        ChaosCollaborator::new(self, config)
    }
}

/// A collaborator that fails some calls instead of forwarding them.
#[derive(Debug)]
pub struct ChaosCollaborator<S> {
    inner: S,
    config: ChaosConfig,
    rng: Mutex<StdRng>,
}

impl<S> ChaosCollaborator<S> {
    /// Wraps `inner` using `config`.
    pub fn new(inner: S, config: ChaosConfig) -> Self {
        let rng = match config.deterministic_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(random()),
        };

        Self {
            inner,
            config,
            rng: Mutex::new(rng),
        }
    }

    /// The wrapped collaborator.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    fn should_inject(&self) -> bool {
        let probability: f32 = self.config.failure_probability.into();

        if probability <= 0.0 {
            return false;
        }

        if probability >= 1.0 {
            return true;
        }

        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_bool(f64::from(probability))
    }

    fn inject(&self, operation: &'static str) -> Result<(), CollaboratorError> {
        if self.should_inject() {
            warn!(operation, "Injecting collaborator failure");
            return Err(CollaboratorError::new(InjectedFailure { operation }));
        }
        Ok(())
    }
}

impl<S> SeatReservationService for ChaosCollaborator<S>
where
    S: SeatReservationService,
{
    fn reserve_seat(
        &self,
        account_id: AccountId,
        total_seats_to_allocate: u32,
    ) -> Result<(), CollaboratorError> {
        self.inject("seat reservation")?;
        self.inner.reserve_seat(account_id, total_seats_to_allocate)
    }
}

impl<S> TicketPaymentService for ChaosCollaborator<S>
where
    S: TicketPaymentService,
{
    fn make_payment(
        &self,
        account_id: AccountId,
        total_amount_to_pay: u64,
    ) -> Result<(), CollaboratorError> {
        self.inject("payment")?;
        self.inner.make_payment(account_id, total_amount_to_pay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::recording_collaborators;
    use cinema_tickets_memory::InMemoryPaymentService;

    fn account() -> AccountId {
        AccountId::try_new(1).unwrap()
    }

    #[test]
    fn probability_rejects_out_of_range_values() {
        assert!(Probability::try_new(0.0).is_ok());
        assert!(Probability::try_new(1.0).is_ok());
        assert!(Probability::try_new(1.5).is_err());
        assert!(Probability::try_new(-0.1).is_err());
    }

    #[test]
    fn default_config_never_fails() {
        let (log, payments, _) = recording_collaborators();
        let chaotic = payments.with_chaos(ChaosConfig::default());

        for _ in 0..50 {
            chaotic.make_payment(account(), 1).unwrap();
        }

        assert_eq!(log.calls().len(), 50);
    }

    #[test]
    fn always_failing_config_fails_without_forwarding() {
        let (log, _, reservations) = recording_collaborators();
        let chaotic = reservations.with_chaos(ChaosConfig::always_failing());

        let error = chaotic.reserve_seat(account(), 2).unwrap_err();

        assert_eq!(error.to_string(), "injected seat reservation failure");
        assert!(log.is_empty());
    }

    #[test]
    fn forwarded_calls_reach_the_inner_collaborator() {
        let chaotic = InMemoryPaymentService::new().with_chaos(ChaosConfig::default());

        chaotic.make_payment(account(), 40).unwrap();

        assert_eq!(chaotic.inner().total_paid(account()), 40);
    }

    #[test]
    fn same_seed_injects_the_same_failures() {
        let probability = Probability::try_new(0.5).unwrap();
        let run = || {
            let (_, payments, _) = recording_collaborators();
            let chaotic = payments.with_chaos(
                ChaosConfig::deterministic()
                    .with_seed(42)
                    .with_failure_probability(probability),
            );
            (0..32)
                .map(|_| chaotic.make_payment(account(), 1).is_ok())
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }
}
