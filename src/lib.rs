//! Kaotic client library.
//!
//! Exposes the board and roster views, the turn policy, configuration, and
//! the host protocol for use by integration tests and the binary entry points.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod policy;
pub mod protocol;
pub mod scrimmage;
