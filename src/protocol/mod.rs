//! Host protocol handling.
//!
//! Parses the line commands a host sends, decodes JSON board snapshots, and
//! formats the action lists sent back.

pub mod parser;
pub mod snapshot;

pub use parser::{parse_command, Command, GoParams};
pub use snapshot::{
    encode_snapshot, format_actions, parse_actions, parse_snapshot, Position, SnapshotError,
};
