//! Shared domain types for the DealDash backend.
//!
//! - [`types`] -- primitive aliases used across crates (`DbId`, `Timestamp`).
//! - [`error`] -- the domain error taxonomy ([`error::CoreError`]).
//! - [`geo`] -- great-circle distance math for nearby search.

pub mod error;
pub mod geo;
pub mod types;
