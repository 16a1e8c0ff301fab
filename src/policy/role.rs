//! Role dispatch over a character's rank and class.

use crate::board::{Character, ClassType, RankType};

/// The behavior branch a character falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    GenericHealer,
    Leader,
    GenericAttacker,
    /// Any other combination (e.g. a generic tank). Produces no action.
    Unrecognized,
}

impl Role {
    /// Classifies a character. Every leader shares one branch regardless of
    /// class.
    pub fn of(character: &Character) -> Role {
        match (character.rank_type, character.class_type) {
            (RankType::Leader, _) => Role::Leader,
            (RankType::Generic, ClassType::Healer) => Role::GenericHealer,
            (RankType::Generic, ClassType::Attacker) => Role::GenericAttacker,
            (RankType::Generic, ClassType::Tank) => Role::Unrecognized,
        }
    }
}
