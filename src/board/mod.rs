//! Board representation and roster types.
//!
//! Contains the character model, the read-only board and roster views the
//! policy queries, and their in-memory snapshot implementations.

pub mod character;
pub mod game_board;
pub mod team;

pub use character::{Character, ClassType, RankType, Vector};
pub use game_board::{BoardView, GameBoard, BOARD_HEIGHT, BOARD_WIDTH};
pub use team::{CountryType, TeamManager, TeamRoster, TurnPair};
