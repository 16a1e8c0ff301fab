//! The scripted turn policy.
//!
//! Each turn the active character is classified by [`Role`] and mapped to
//! at most one row swap followed by exactly one offensive action:
//!
//! - Generic healer: when an enemy sits across from it, slide toward the
//!   first empty row of the enemy column, then heal/attack by health and
//!   special points.
//! - Leader: second special when affordable, basic attack otherwise. Never moves.
//! - Generic attacker: unless already facing a healer, slide toward the first
//!   enemy healer, then use the first special when affordable.
//!
//! A swap replaces whatever list the caller passed in; the offensive action
//! is appended. The leader branch replaces the list outright.

use crate::action::{ActionType, SelectGeneric, SelectLeader, TeamData};
use crate::board::{BoardView, Character, ClassType, CountryType, TeamRoster, Vector};
use crate::config::PolicyConfig;

use super::role::Role;

/// Coarse health classification of the last character evaluated.
///
/// Recorded every turn; no branch reads it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

/// Policy state persisted between turns.
#[derive(Debug, Clone)]
pub struct TurnPolicy {
    config: PolicyConfig,
    country: Option<CountryType>,
    my_team: Vec<Character>,
    current_state: HealthState,
}

impl Default for TurnPolicy {
    fn default() -> Self {
        TurnPolicy::new(PolicyConfig::default())
    }
}

impl TurnPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        TurnPolicy {
            config,
            country: None,
            my_team: Vec::new(),
            current_state: HealthState::Healthy,
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Swaps in new thresholds. Latched state is kept.
    pub fn set_config(&mut self, config: PolicyConfig) {
        self.config = config;
    }

    /// The side latched on the first turn, if it has happened yet.
    pub fn country(&self) -> Option<CountryType> {
        self.country
    }

    /// Roster snapshot latched on the first turn.
    pub fn my_team(&self) -> &[Character] {
        &self.my_team
    }

    pub fn current_state(&self) -> HealthState {
        self.current_state
    }

    /// Team registration: display name and `(generic, leader, generic)` picks.
    pub fn team_data(&self) -> TeamData {
        TeamData {
            name: self.config.team_name.clone(),
            selection: (
                SelectGeneric::GenHealer,
                SelectLeader::Calmus,
                SelectGeneric::GenAttacker,
            ),
        }
    }

    /// Latches the controlled side and roster. Overwrites unconditionally.
    pub fn first_turn_init<R: TeamRoster + ?Sized>(&mut self, roster: &R) {
        self.country = Some(roster.country());
        self.my_team = roster.characters().to_vec();
        self.current_state = HealthState::Healthy;
    }

    /// Current health as a fraction of max health. Not clamped.
    pub fn health_ratio(character: &Character) -> f64 {
        debug_assert!(character.max_health > 0, "max_health must be positive");
        character.current_health as f64 / character.max_health as f64
    }

    /// The character on this side that acts in the current rotation slot.
    pub fn active_character<'r, R, B>(roster: &'r R, board: &B) -> Option<&'r Character>
    where
        R: TeamRoster + ?Sized,
        B: BoardView + ?Sized,
    {
        roster.active_character(board.ordered_teams(), board.active_pair_index())
    }

    /// Decides this turn's actions for the active character.
    ///
    /// Returns an empty list when this side has no character to act. A
    /// character of an unrecognized role gets `actions` back untouched.
    pub fn take_turn<B, R>(
        &mut self,
        turn: u32,
        mut actions: Vec<ActionType>,
        board: &B,
        roster: &R,
    ) -> Vec<ActionType>
    where
        B: BoardView + ?Sized,
        R: TeamRoster + ?Sized,
    {
        if turn == 1 {
            self.first_turn_init(roster);
        }

        let Some(active) = Self::active_character(roster, board) else {
            tracing::debug!(turn, "no active character this slot");
            return Vec::new();
        };

        let enemy_x = self.country.unwrap_or_else(|| roster.country()).enemy_column();
        let active_enemy = board.character_at(Vector::new(enemy_x, active.position.y));

        self.current_state = if Self::health_ratio(active) >= self.config.healthy_ratio {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        };

        let role = Role::of(active);
        match role {
            Role::GenericHealer => {
                if active_enemy.is_some() {
                    if let Some(swap) = first_swap(board, active, enemy_x, |c| c.is_none()) {
                        actions = vec![swap];
                    }
                }
                actions.push(self.healer_attack(active));
            }
            Role::Leader => {
                actions = vec![self.leader_attack(active)];
            }
            Role::GenericAttacker => {
                let attacker_move = active_enemy.map_or(true, |e| e.class_type != ClassType::Healer);
                if attacker_move {
                    let swap = first_swap(board, active, enemy_x, |c| {
                        c.is_some_and(|c| c.class_type == ClassType::Healer)
                    });
                    if let Some(swap) = swap {
                        actions = vec![swap];
                    }
                }
                let attack = if active.special_points >= self.config.attacker_special_one_cost {
                    ActionType::UseS1
                } else {
                    ActionType::UseNm
                };
                actions.push(attack);
            }
            Role::Unrecognized => {}
        }

        tracing::debug!(
            turn,
            character = %active.name,
            ?role,
            state = ?self.current_state,
            ?actions,
            "turn decided"
        );
        actions
    }

    fn healer_attack(&self, active: &Character) -> ActionType {
        if active.current_health < self.config.healer_emergency_health {
            ActionType::UseS1
        } else if active.special_points >= self.config.healer_special_two_cost {
            ActionType::UseS2
        } else {
            ActionType::UseNm
        }
    }

    fn leader_attack(&self, active: &Character) -> ActionType {
        if active.special_points >= self.config.leader_special_two_cost {
            ActionType::UseS2
        } else {
            ActionType::UseNm
        }
    }
}

/// Scans the board in order for the first cell of the enemy column matching
/// `wanted` that lies in a different row than `active`, and returns the swap
/// toward it. Cells in the active character's own row are skipped.
fn first_swap<B, F>(board: &B, active: &Character, enemy_x: i32, wanted: F) -> Option<ActionType>
where
    B: BoardView + ?Sized,
    F: Fn(Option<&Character>) -> bool,
{
    board
        .in_bound_coords()
        .into_iter()
        .filter(|coord| coord.x == enemy_x && wanted(board.character_at(*coord)))
        .find_map(|coord| swap_toward(active.position.y, coord.y))
}

/// Row swap that moves a character at `from_y` toward `to_y`.
fn swap_toward(from_y: i32, to_y: i32) -> Option<ActionType> {
    let offset = from_y - to_y;
    if offset > 0 {
        Some(ActionType::SwapUp)
    } else if offset < 0 {
        Some(ActionType::SwapDown)
    } else {
        None
    }
}
