//! Scrimmage: bulk evaluation of the turn policy over random snapshots.
//!
//! Each sample builds a random but well-formed board (three controlled
//! characters against up to three opponents, random stats, random rotation),
//! runs one turn of the policy, and checks the shape of the action list.
//! Samples are independent, so they run on a rayon pool when more than one
//! thread is requested. Results can be written as JSONL.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::action::{ActionType, ALL_ACTIONS};
use crate::board::{
    Character, ClassType, CountryType, GameBoard, RankType, TeamManager, TurnPair, Vector,
    BOARD_HEIGHT,
};
use crate::config::PolicyConfig;
use crate::policy::{Role, TurnPolicy};
use crate::protocol::snapshot::{encode_snapshot, Position, SnapshotError};

/// Errors that can abort a scrimmage run.
#[derive(Debug, thiserror::Error)]
pub enum ScrimmageError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to encode snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("failed to write records: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for a scrimmage run.
#[derive(Debug, Clone)]
pub struct ScrimmageConfig {
    /// Number of random snapshots to evaluate.
    pub samples: usize,
    /// Number of worker threads.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Thresholds handed to every policy instance.
    pub policy: PolicyConfig,
}

impl Default for ScrimmageConfig {
    fn default() -> Self {
        ScrimmageConfig {
            samples: 1000,
            threads: 4,
            seed: 0,
            policy: PolicyConfig::default(),
        }
    }
}

/// A broken output-shape rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// More than one swap in the list.
    MultipleSwaps,
    /// A swap that is not the first action.
    SwapNotFirst,
    /// A leader asked to move.
    LeaderMoved,
    /// A recognized role did not end with exactly one offensive action.
    BadOffensiveTail,
    /// An unrecognized role or empty slot produced actions.
    UnexpectedActions,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Violation::MultipleSwaps => "multiple swaps",
            Violation::SwapNotFirst => "swap not first",
            Violation::LeaderMoved => "leader moved",
            Violation::BadOffensiveTail => "bad offensive tail",
            Violation::UnexpectedActions => "unexpected actions",
        };
        f.write_str(s)
    }
}

/// One evaluated sample.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRecord {
    pub sample_id: usize,
    /// The snapshot as a host would send it.
    pub snapshot: String,
    /// Name of the active character, if any.
    pub active: Option<String>,
    pub role: Option<String>,
    pub actions: Vec<&'static str>,
    pub violations: Vec<Violation>,
}

/// Checks an action list against the output-shape rules for `role`
/// (`None` when no character was active).
pub fn check_actions(role: Option<Role>, actions: &[ActionType]) -> Vec<Violation> {
    let mut violations = Vec::new();

    let swaps = actions.iter().filter(|a| a.is_swap()).count();
    if swaps > 1 {
        violations.push(Violation::MultipleSwaps);
    }
    if actions.iter().skip(1).any(|a| a.is_swap()) {
        violations.push(Violation::SwapNotFirst);
    }

    match role {
        Some(Role::Leader) | Some(Role::GenericHealer) | Some(Role::GenericAttacker) => {
            if role == Some(Role::Leader) && swaps > 0 {
                violations.push(Violation::LeaderMoved);
            }
            let offensive = actions.iter().filter(|a| a.is_offensive()).count();
            let ends_offensive = actions.last().is_some_and(|a| a.is_offensive());
            if offensive != 1 || !ends_offensive {
                violations.push(Violation::BadOffensiveTail);
            }
        }
        Some(Role::Unrecognized) | None => {
            if !actions.is_empty() {
                violations.push(Violation::UnexpectedActions);
            }
        }
    }

    violations
}

/// Builds a random well-formed position.
pub fn random_position(rng: &mut impl Rng) -> Position {
    let country = if rng.gen_bool(0.5) {
        CountryType::Uroda
    } else {
        CountryType::Turpis
    };
    let mut board = GameBoard::default();

    let mut rows: Vec<i32> = (0..BOARD_HEIGHT).collect();
    rows.shuffle(rng);
    let picks = [
        ("gen_healer", RankType::Generic, ClassType::Healer),
        ("calmus", RankType::Leader, ClassType::Attacker),
        ("gen_attacker", RankType::Generic, ClassType::Attacker),
    ];
    let mut team = Vec::with_capacity(picks.len());
    for ((name, rank, class), y) in picks.into_iter().zip(rows) {
        let c = random_character(rng, name, rank, class, Vector::new(country.home_column(), y));
        board.place(c.clone());
        team.push(c);
    }

    let mut enemies = Vec::new();
    for y in 0..BOARD_HEIGHT {
        if rng.gen_bool(0.25) {
            continue;
        }
        let class = *[ClassType::Attacker, ClassType::Healer, ClassType::Tank]
            .choose(rng)
            .unwrap_or(&ClassType::Attacker);
        let rank = if rng.gen_bool(0.2) {
            RankType::Leader
        } else {
            RankType::Generic
        };
        let name = format!("enemy_{}", y);
        let c = random_character(rng, &name, rank, class, Vector::new(country.enemy_column(), y));
        board.place(c.clone());
        enemies.push(c);
    }

    let mut ours: Vec<&str> = team.iter().map(|c| c.name.as_str()).collect();
    let mut theirs: Vec<&str> = enemies.iter().map(|c| c.name.as_str()).collect();
    ours.shuffle(rng);
    theirs.shuffle(rng);
    let slots = ours.len().max(theirs.len());
    board.ordered_teams = (0..slots)
        .map(|i| {
            let (mine, other) = (ours.get(i).copied(), theirs.get(i).copied());
            match country {
                CountryType::Uroda => TurnPair::new(mine, other),
                CountryType::Turpis => TurnPair::new(other, mine),
            }
        })
        .collect();
    board.active_pair_index = rng.gen_range(0..=slots);

    Position {
        board,
        roster: TeamManager::new(country, team),
    }
}

fn random_character(
    rng: &mut impl Rng,
    name: &str,
    rank_type: RankType,
    class_type: ClassType,
    position: Vector,
) -> Character {
    let max_health = rng.gen_range(300..=700);
    let current_health = if rng.gen_bool(0.1) {
        0
    } else {
        rng.gen_range(1..=max_health)
    };
    Character {
        name: name.to_string(),
        class_type,
        rank_type,
        current_health,
        max_health,
        special_points: rng.gen_range(0..=6),
        position,
    }
}

/// Evaluates a single sample with its own policy instance.
pub fn run_sample(
    sample_id: usize,
    rng: &mut impl Rng,
    policy_config: &PolicyConfig,
) -> Result<SampleRecord, ScrimmageError> {
    let position = random_position(rng);
    let mut policy = TurnPolicy::new(policy_config.clone());
    let actions = policy.take_turn(1, Vec::new(), &position.board, &position.roster);

    let active = TurnPolicy::active_character(&position.roster, &position.board);
    let role = active.map(Role::of);
    let violations = check_actions(role, &actions);
    if !violations.is_empty() {
        tracing::warn!(sample_id, ?violations, ?actions, "policy output violates shape rules");
    }

    Ok(SampleRecord {
        sample_id,
        snapshot: encode_snapshot(&position)?,
        active: active.map(|c| c.name.clone()),
        role: role.map(|r| format!("{:?}", r)),
        actions: actions.iter().map(|a| a.tag()).collect(),
        violations,
    })
}

fn sample_rng(seed: u64, sample_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(sample_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Runs the scrimmage and returns one record per sample, in sample order.
pub fn run_scrimmage(config: &ScrimmageConfig) -> Result<Vec<SampleRecord>, ScrimmageError> {
    if config.threads <= 1 {
        return (0..config.samples)
            .map(|i| run_sample(i, &mut sample_rng(config.seed, i), &config.policy))
            .collect();
    }

    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    pool.install(|| {
        (0..config.samples)
            .into_par_iter()
            .map(|i| run_sample(i, &mut sample_rng(config.seed, i), &config.policy))
            .collect()
    })
}

/// Writes records as JSON lines.
pub fn write_jsonl<W: Write>(records: &[SampleRecord], out: &mut W) -> Result<(), ScrimmageError> {
    for record in records {
        serde_json::to_writer(&mut *out, record).map_err(std::io::Error::from)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Aggregate counts over a scrimmage run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub samples: usize,
    pub idle: usize,
    pub actions: BTreeMap<&'static str, usize>,
    pub roles: BTreeMap<String, usize>,
    pub violations: usize,
}

impl Summary {
    pub fn from_records(records: &[SampleRecord]) -> Self {
        let mut summary = Summary {
            samples: records.len(),
            ..Summary::default()
        };
        for action in ALL_ACTIONS {
            summary.actions.insert(action.tag(), 0);
        }
        for record in records {
            if record.actions.is_empty() {
                summary.idle += 1;
            }
            for tag in &record.actions {
                *summary.actions.entry(*tag).or_insert(0) += 1;
            }
            if let Some(role) = &record.role {
                *summary.roles.entry(role.clone()).or_insert(0) += 1;
            }
            summary.violations += record.violations.len();
        }
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "samples:    {}", self.samples)?;
        writeln!(f, "idle:       {}", self.idle)?;
        for (role, n) in &self.roles {
            writeln!(f, "role {:<16} {}", role, n)?;
        }
        for (tag, n) in &self.actions {
            writeln!(f, "action {:<14} {}", tag, n)?;
        }
        write!(f, "violations: {}", self.violations)
    }
}
