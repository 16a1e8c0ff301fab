//! Board snapshot and the read-only view the policy queries.
//!
//! The board is a `width` x `height` grid; in the standard layout it has two
//! columns, one per side, and three rows.

use super::character::{Character, Vector};
use super::team::TurnPair;

/// Standard board width: one column per side.
pub const BOARD_WIDTH: i32 = 2;

/// Standard board height: three characters per team.
pub const BOARD_HEIGHT: i32 = 3;

/// Read-only queries the policy makes against the board.
pub trait BoardView {
    /// The character occupying `coord`, if any.
    fn character_at(&self, coord: Vector) -> Option<&Character>;

    /// Every in-bound coordinate, row by row (`y` ascending, then `x`).
    fn in_bound_coords(&self) -> Vec<Vector>;

    /// The turn rotation for the current round.
    fn ordered_teams(&self) -> &[TurnPair];

    /// Index of the rotation slot being played.
    fn active_pair_index(&self) -> usize;
}

/// In-memory board snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBoard {
    pub width: i32,
    pub height: i32,
    pub characters: Vec<Character>,
    pub ordered_teams: Vec<TurnPair>,
    pub active_pair_index: usize,
}

impl GameBoard {
    /// Creates an empty board of the given size with no rotation.
    pub fn empty(width: i32, height: i32) -> Self {
        GameBoard {
            width,
            height,
            characters: Vec::new(),
            ordered_teams: Vec::new(),
            active_pair_index: 0,
        }
    }

    /// Returns true if `coord` lies on the board.
    pub fn is_in_bounds(&self, coord: Vector) -> bool {
        (0..self.width).contains(&coord.x) && (0..self.height).contains(&coord.y)
    }

    /// Places a character. Returns false if it is off the board or the cell
    /// is already occupied.
    pub fn place(&mut self, character: Character) -> bool {
        if !self.is_in_bounds(character.position) || self.character_at(character.position).is_some() {
            return false;
        }
        self.characters.push(character);
        true
    }
}

impl Default for GameBoard {
    fn default() -> Self {
        GameBoard::empty(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl BoardView for GameBoard {
    fn character_at(&self, coord: Vector) -> Option<&Character> {
        self.characters.iter().find(|c| c.position == coord)
    }

    fn in_bound_coords(&self) -> Vec<Vector> {
        let cells = self.width.max(0) as usize * self.height.max(0) as usize;
        let mut coords = Vec::with_capacity(cells);
        for y in 0..self.height {
            for x in 0..self.width {
                coords.push(Vector::new(x, y));
            }
        }
        coords
    }

    fn ordered_teams(&self) -> &[TurnPair] {
        &self.ordered_teams
    }

    fn active_pair_index(&self) -> usize {
        self.active_pair_index
    }
}
