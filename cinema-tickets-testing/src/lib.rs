//! Testing support for the `cinema-tickets` purchase core.
//!
//! - [`recording`]: collaborators that record every call in a shared log
//! - [`chaos`]: wrappers that inject collaborator failures
//! - [`generators`]: `proptest` strategies for purchase requests
//! - [`assertions`]: assertions over recorded collaborator calls

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assertions;
pub mod chaos;
pub mod generators;
pub mod recording;

pub use assertions::{assert_no_side_effects, assert_reserved_then_paid};
pub use chaos::{ChaosCollaborator, ChaosConfig, ChaosExt, InjectedFailure, Probability};
pub use recording::{
    recording_collaborators, CallLog, CollaboratorCall, RecordingPaymentService,
    RecordingSeatReservation,
};
