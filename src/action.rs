//! Action tags and team selection.
//!
//! `ActionType` is what the policy emits each turn; the engine executes the
//! tags in order for the active character. `SelectGeneric` and
//! `SelectLeader` are the one-time team picks made before the match.

use std::fmt;

/// A discrete action for the active character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Swap places with the character one row up.
    SwapUp,
    /// Swap places with the character one row down.
    SwapDown,
    /// Basic attack.
    UseNm,
    /// First special ability.
    UseS1,
    /// Second special ability.
    UseS2,
}

/// All action tags, in wire order.
pub const ALL_ACTIONS: [ActionType; 5] = [
    ActionType::SwapUp,
    ActionType::SwapDown,
    ActionType::UseNm,
    ActionType::UseS1,
    ActionType::UseS2,
];

impl ActionType {
    /// Returns the protocol tag, e.g. `SWAP_UP`.
    pub const fn tag(self) -> &'static str {
        match self {
            ActionType::SwapUp => "SWAP_UP",
            ActionType::SwapDown => "SWAP_DOWN",
            ActionType::UseNm => "USE_NM",
            ActionType::UseS1 => "USE_S1",
            ActionType::UseS2 => "USE_S2",
        }
    }

    /// Parses an action from its protocol tag.
    pub fn from_tag(s: &str) -> Option<ActionType> {
        ALL_ACTIONS.iter().copied().find(|a| a.tag() == s)
    }

    /// Returns true for the row-swap movement actions.
    pub const fn is_swap(self) -> bool {
        matches!(self, ActionType::SwapUp | ActionType::SwapDown)
    }

    /// Returns true for the basic attack and both specials.
    pub const fn is_offensive(self) -> bool {
        !self.is_swap()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Generic character picks for the two non-leader slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectGeneric {
    GenAttacker,
    GenHealer,
    GenTank,
}

impl SelectGeneric {
    pub const fn name(self) -> &'static str {
        match self {
            SelectGeneric::GenAttacker => "gen_attacker",
            SelectGeneric::GenHealer => "gen_healer",
            SelectGeneric::GenTank => "gen_tank",
        }
    }
}

/// Leader picks for the middle slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectLeader {
    Anahita,
    Berry,
    Calmus,
    Fultra,
    Irwin,
    Ninlil,
}

impl SelectLeader {
    pub const fn name(self) -> &'static str {
        match self {
            SelectLeader::Anahita => "anahita",
            SelectLeader::Berry => "berry",
            SelectLeader::Calmus => "calmus",
            SelectLeader::Fultra => "fultra",
            SelectLeader::Irwin => "irwin",
            SelectLeader::Ninlil => "ninlil",
        }
    }
}

/// Team registration: a display name and the three positional picks
/// `(generic, leader, generic)`.
///
/// The engine substitutes a generic attacker for any slot that does not
/// match its position; that correction happens on the engine side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamData {
    pub name: String,
    pub selection: (SelectGeneric, SelectLeader, SelectGeneric),
}

impl fmt::Display for TeamData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, leader, second) = self.selection;
        write!(
            f,
            "{} {} {} {}",
            self.name,
            first.name(),
            leader.name(),
            second.name()
        )
    }
}
