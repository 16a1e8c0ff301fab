//! Characters and board coordinates.
//!
//! A character is identified by its name within a match and carries the
//! stats the policy reads each turn: health, special points, class, rank,
//! and its current cell on the board.

use serde::{Deserialize, Serialize};

/// An integer board coordinate. `x` selects the team column, `y` the row.
///
/// Rows grow downward: a smaller `y` is "up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The combat class of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassType {
    Attacker,
    Healer,
    Tank,
}

/// Whether a character is a rank-and-file generic or the team leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankType {
    Generic,
    Leader,
}

/// A character as seen in one turn's snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class_type: ClassType,
    pub rank_type: RankType,
    pub current_health: u32,
    pub max_health: u32,
    pub special_points: u32,
    pub position: Vector,
}

impl Character {
    /// Returns true while the character still has health left.
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }
}
