//! Behavioral properties of the turn policy, checked against minimal
//! hand-written board and roster fakes.

use std::collections::HashMap;

use kaotic::action::ActionType::{self, *};
use kaotic::board::{
    BoardView, Character, ClassType, CountryType, RankType, TeamRoster, TurnPair, Vector,
};
use kaotic::policy::{HealthState, TurnPolicy};

/// A 2x3 board backed by a coordinate map.
#[derive(Clone, Default)]
struct FakeBoard {
    cells: HashMap<Vector, Character>,
}

impl FakeBoard {
    fn with(mut self, c: Character) -> Self {
        self.cells.insert(c.position, c);
        self
    }
}

impl BoardView for FakeBoard {
    fn character_at(&self, coord: Vector) -> Option<&Character> {
        self.cells.get(&coord)
    }

    fn in_bound_coords(&self) -> Vec<Vector> {
        (0..3)
            .flat_map(|y| (0..2).map(move |x| Vector::new(x, y)))
            .collect()
    }

    fn ordered_teams(&self) -> &[TurnPair] {
        &[]
    }

    fn active_pair_index(&self) -> usize {
        0
    }
}

/// A roster whose active character is fixed up front.
struct FakeRoster {
    country: CountryType,
    active: Option<Character>,
}

impl TeamRoster for FakeRoster {
    fn country(&self) -> CountryType {
        self.country
    }

    fn characters(&self) -> &[Character] {
        self.active.as_slice()
    }

    fn active_character(&self, _: &[TurnPair], _: usize) -> Option<&Character> {
        self.active.as_ref()
    }
}

fn character(rank: RankType, class: ClassType, x: i32, y: i32) -> Character {
    Character {
        name: format!("{:?}-{:?}-{}-{}", rank, class, x, y),
        class_type: class,
        rank_type: rank,
        current_health: 400,
        max_health: 400,
        special_points: 0,
        position: Vector::new(x, y),
    }
}

fn leader(sp: u32) -> Character {
    Character {
        special_points: sp,
        ..character(RankType::Leader, ClassType::Attacker, 0, 1)
    }
}

fn healer(health: u32, sp: u32, y: i32) -> Character {
    Character {
        current_health: health,
        special_points: sp,
        ..character(RankType::Generic, ClassType::Healer, 0, y)
    }
}

fn attacker(sp: u32, y: i32) -> Character {
    Character {
        special_points: sp,
        ..character(RankType::Generic, ClassType::Attacker, 0, y)
    }
}

/// Runs one turn for `active` (placed on `board`) as Uroda.
fn decide(active: Option<Character>, board: FakeBoard, incoming: Vec<ActionType>) -> Vec<ActionType> {
    let board = match &active {
        Some(c) => board.with(c.clone()),
        None => board,
    };
    let roster = FakeRoster {
        country: CountryType::Uroda,
        active,
    };
    TurnPolicy::default().take_turn(1, incoming, &board, &roster)
}

/// Every arrangement of up to three enemies in column 1.
fn enemy_boards() -> Vec<FakeBoard> {
    let classes = [None, Some(ClassType::Attacker), Some(ClassType::Healer), Some(ClassType::Tank)];
    let mut boards = Vec::new();
    for a in classes {
        for b in classes {
            for c in classes {
                let mut board = FakeBoard::default();
                for (y, class) in [a, b, c].into_iter().enumerate() {
                    if let Some(class) = class {
                        board = board.with(character(RankType::Generic, class, 1, y as i32));
                    }
                }
                boards.push(board);
            }
        }
    }
    boards
}

fn assert_swap_shape(actions: &[ActionType]) {
    let swaps: Vec<usize> = actions
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_swap())
        .map(|(i, _)| i)
        .collect();
    assert!(swaps.len() <= 1, "more than one swap: {:?}", actions);
    if let Some(&i) = swaps.first() {
        assert_eq!(i, 0, "swap not first: {:?}", actions);
    }
}

#[test]
fn no_active_character_yields_empty_list() {
    assert!(decide(None, FakeBoard::default(), vec![]).is_empty());
    assert!(decide(None, FakeBoard::default(), vec![UseS1]).is_empty());
}

#[test]
fn leader_with_five_points_uses_second_special() {
    assert_eq!(decide(Some(leader(5)), FakeBoard::default(), vec![]), vec![UseS2]);
}

#[test]
fn leader_with_two_points_attacks() {
    assert_eq!(decide(Some(leader(2)), FakeBoard::default(), vec![]), vec![UseNm]);
}

#[test]
fn leader_never_swaps() {
    for board in enemy_boards() {
        for sp in 0..8 {
            let out = decide(Some(leader(sp)), board.clone(), vec![SwapUp]);
            let expected = if sp >= 5 { UseS2 } else { UseNm };
            assert_eq!(out, vec![expected]);
        }
    }
}

#[test]
fn attacker_final_action_follows_special_points() {
    for y in 0..3 {
        for sp in 0..3 {
            for board in enemy_boards() {
                let out = decide(Some(attacker(sp, y)), board, vec![]);
                let expected = if sp >= 1 { UseS1 } else { UseNm };
                assert_eq!(out.last(), Some(&expected));
                assert_swap_shape(&out);
            }
        }
    }
}

#[test]
fn attacker_without_enemies_does_not_move() {
    assert_eq!(decide(Some(attacker(0, 1)), FakeBoard::default(), vec![]), vec![UseNm]);
}

#[test]
fn wounded_healer_always_uses_first_special() {
    for y in 0..3 {
        for sp in 0..6 {
            for board in enemy_boards() {
                let out = decide(Some(healer(150, sp, y)), board, vec![]);
                assert_eq!(out.last(), Some(&UseS1));
                assert_swap_shape(&out);
            }
        }
    }
}

#[test]
fn healer_facing_full_enemy_column_does_not_move() {
    let board = FakeBoard::default()
        .with(character(RankType::Generic, ClassType::Attacker, 1, 0))
        .with(character(RankType::Leader, ClassType::Tank, 1, 1))
        .with(character(RankType::Generic, ClassType::Healer, 1, 2));
    assert_eq!(decide(Some(healer(150, 0, 1)), board, vec![]), vec![UseS1]);
}

#[test]
fn healthy_healer_spends_points_on_second_special() {
    assert_eq!(decide(Some(healer(400, 3, 0)), FakeBoard::default(), vec![]), vec![UseS2]);
    assert_eq!(decide(Some(healer(400, 2, 0)), FakeBoard::default(), vec![]), vec![UseNm]);
}

#[test]
fn swap_replaces_incoming_actions() {
    // Enemy facing the healer at row 2, empty cell at row 0.
    let board = FakeBoard::default()
        .with(character(RankType::Generic, ClassType::Tank, 1, 1))
        .with(character(RankType::Generic, ClassType::Attacker, 1, 2));
    let out = decide(Some(healer(400, 0, 2)), board, vec![UseS2, UseS2]);
    assert_eq!(out, vec![SwapUp, UseNm]);
}

#[test]
fn unrecognized_role_produces_nothing() {
    let tank = character(RankType::Generic, ClassType::Tank, 0, 0);
    assert!(decide(Some(tank), FakeBoard::default(), vec![]).is_empty());
}

#[test]
fn health_state_is_recorded_but_inert() {
    let board = FakeBoard::default().with(leader(0));
    let roster = FakeRoster {
        country: CountryType::Uroda,
        active: Some(Character {
            current_health: 100,
            ..leader(0)
        }),
    };
    let mut policy = TurnPolicy::default();
    assert_eq!(policy.take_turn(1, vec![], &board, &roster), vec![UseNm]);
    assert_eq!(policy.current_state(), HealthState::Unhealthy);
}
