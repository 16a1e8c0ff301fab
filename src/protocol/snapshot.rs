//! Snapshot decoding and action formatting.
//!
//! A snapshot is one JSON document describing the board as the host sees it
//! at the start of a turn, plus which side and which characters we control:
//!
//! ```json
//! {"country":"uroda","team":["h","calmus","a"],
//!  "board":{"width":2,"height":3,
//!           "characters":[{"name":"h","class_type":"healer","rank_type":"generic",
//!                          "current_health":300,"max_health":400,"special_points":0,
//!                          "position":{"x":0,"y":0}}, ...],
//!           "ordered_teams":[["h","e1"],[null,"e2"]],
//!           "active_pair_index":0}}
//! ```
//!
//! Actions go back as space-separated tags, or `-` for an empty list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::action::ActionType;
use crate::board::{
    Character, CountryType, GameBoard, TeamManager, TurnPair, Vector, BOARD_HEIGHT, BOARD_WIDTH,
};

/// Errors that can occur while decoding a snapshot or an action list.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid board size {width}x{height}")]
    InvalidBoardSize { width: i32, height: i32 },

    #[error("character '{0}' has zero max health")]
    ZeroMaxHealth(String),

    #[error("character '{0}' has more health than its max")]
    HealthAboveMax(String),

    #[error("character '{name}' is off the board at ({x}, {y})")]
    OutOfBounds { name: String, x: i32, y: i32 },

    #[error("two characters occupy ({x}, {y})")]
    Occupied { x: i32, y: i32 },

    #[error("duplicate character name '{0}'")]
    DuplicateName(String),

    #[error("team member '{0}' is not on the board")]
    UnknownTeamMember(String),

    #[error("unknown action tag '{0}'")]
    UnknownAction(String),
}

/// Wire form of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub country: CountryType,
    /// Names of the characters we control.
    pub team: Vec<String>,
    pub board: BoardSnapshot,
}

/// Wire form of the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    pub characters: Vec<Character>,
    #[serde(default)]
    pub ordered_teams: Vec<TurnPair>,
    #[serde(default)]
    pub active_pair_index: usize,
}

fn default_width() -> i32 {
    BOARD_WIDTH
}

fn default_height() -> i32 {
    BOARD_HEIGHT
}

/// A validated snapshot: the board and our roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: GameBoard,
    pub roster: TeamManager,
}

/// Parses and validates a JSON snapshot.
pub fn parse_snapshot(s: &str) -> Result<Position, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_str(s)?;
    build_position(snapshot)
}

/// Validates a decoded snapshot and builds the in-memory board and roster.
pub fn build_position(snapshot: Snapshot) -> Result<Position, SnapshotError> {
    let Snapshot {
        country,
        team,
        board: wire,
    } = snapshot;

    if wire.width != BOARD_WIDTH || wire.height != BOARD_HEIGHT {
        return Err(SnapshotError::InvalidBoardSize {
            width: wire.width,
            height: wire.height,
        });
    }

    let mut board = GameBoard::empty(wire.width, wire.height);
    board.ordered_teams = wire.ordered_teams;
    board.active_pair_index = wire.active_pair_index;

    let mut names = HashSet::new();
    for c in wire.characters {
        if c.max_health == 0 {
            return Err(SnapshotError::ZeroMaxHealth(c.name));
        }
        if c.current_health > c.max_health {
            return Err(SnapshotError::HealthAboveMax(c.name));
        }
        if !names.insert(c.name.clone()) {
            return Err(SnapshotError::DuplicateName(c.name));
        }
        let Vector { x, y } = c.position;
        if !board.is_in_bounds(c.position) {
            return Err(SnapshotError::OutOfBounds { name: c.name, x, y });
        }
        if !board.place(c) {
            return Err(SnapshotError::Occupied { x, y });
        }
    }

    let mut members = Vec::with_capacity(team.len());
    for name in team {
        match board.characters.iter().find(|c| c.name == name) {
            Some(c) => members.push(c.clone()),
            None => return Err(SnapshotError::UnknownTeamMember(name)),
        }
    }

    Ok(Position {
        board,
        roster: TeamManager::new(country, members),
    })
}

/// Encodes a position as a single-line JSON snapshot.
pub fn encode_snapshot(position: &Position) -> Result<String, SnapshotError> {
    let Position { board, roster } = position;
    let snapshot = Snapshot {
        country: roster.country,
        team: roster.team.iter().map(|c| c.name.clone()).collect(),
        board: BoardSnapshot {
            width: board.width,
            height: board.height,
            characters: board.characters.clone(),
            ordered_teams: board.ordered_teams.clone(),
            active_pair_index: board.active_pair_index,
        },
    };
    Ok(serde_json::to_string(&snapshot)?)
}

/// Formats an action list as space-separated tags, `-` when empty.
pub fn format_actions(actions: &[ActionType]) -> String {
    if actions.is_empty() {
        return "-".to_string();
    }
    actions
        .iter()
        .map(|a| a.tag())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses an action list produced by [`format_actions`].
pub fn parse_actions(s: &str) -> Result<Vec<ActionType>, SnapshotError> {
    let s = s.trim();
    if s == "-" || s.is_empty() {
        return Ok(Vec::new());
    }
    s.split_whitespace()
        .map(|tag| ActionType::from_tag(tag).ok_or_else(|| SnapshotError::UnknownAction(tag.to_string())))
        .collect()
}
