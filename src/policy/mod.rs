//! Turn decision policy.
//!
//! Maps the active character's role and resources to an ordered action list
//! for the current turn.

pub mod client;
pub mod role;

pub use client::{HealthState, TurnPolicy};
pub use role::Role;
