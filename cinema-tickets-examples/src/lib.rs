//! Example front ends for the `cinema-tickets` purchase core.
//!
//! The `box_office` binary buys tickets from the command line against the
//! in-memory collaborators. Its argument and environment parsing lives here so
//! it can be tested without spawning the binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Command line box office: argument parsing and environment configuration.
pub mod box_office;
