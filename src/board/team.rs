//! Team affiliation, rotation order, and roster lookup.
//!
//! The engine decides who acts when: the board carries an ordered list of
//! rotation slots, each naming at most one character per side, plus the
//! index of the slot currently being played. A roster resolves its own
//! active character from that pair.

use serde::{Deserialize, Serialize};

use super::character::Character;

/// The side a team fights for. Each side owns one board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryType {
    Uroda,
    Turpis,
}

impl CountryType {
    /// The board column holding this side's characters.
    pub const fn home_column(self) -> i32 {
        match self {
            CountryType::Uroda => 0,
            CountryType::Turpis => 1,
        }
    }

    /// The board column holding the opposing side's characters.
    pub const fn enemy_column(self) -> i32 {
        match self {
            CountryType::Uroda => 1,
            CountryType::Turpis => 0,
        }
    }
}

/// One slot of the turn rotation: the character names that act in it.
///
/// Either side may be absent when a team has fewer characters left than
/// its opponent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPair(pub [Option<String>; 2]);

impl TurnPair {
    pub fn new(first: Option<&str>, second: Option<&str>) -> Self {
        TurnPair([first.map(str::to_string), second.map(str::to_string)])
    }

    /// Returns true if `name` acts in this slot.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().flatten().any(|n| n == name)
    }
}

/// Read access to a team's characters and its active-character resolution.
pub trait TeamRoster {
    /// The side this team fights for.
    fn country(&self) -> CountryType;

    /// All characters on the team, in roster order.
    fn characters(&self) -> &[Character];

    /// Resolves which of this team's characters acts in the given rotation
    /// slot, if any.
    fn active_character(&self, ordered_teams: &[TurnPair], index: usize) -> Option<&Character>;
}

/// In-memory roster built from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamManager {
    pub country: CountryType,
    pub team: Vec<Character>,
}

impl TeamManager {
    pub fn new(country: CountryType, team: Vec<Character>) -> Self {
        Self { country, team }
    }
}

impl TeamRoster for TeamManager {
    fn country(&self) -> CountryType {
        self.country
    }

    fn characters(&self) -> &[Character] {
        &self.team
    }

    fn active_character(&self, ordered_teams: &[TurnPair], index: usize) -> Option<&Character> {
        let pair = ordered_teams.get(index)?;
        self.team
            .iter()
            .find(|c| c.is_alive() && pair.contains(&c.name))
    }
}
