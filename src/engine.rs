//! Client session state.
//!
//! Holds the current snapshot, the turn counter, the policy configuration,
//! and the policy itself, and answers protocol commands.

use std::io::{self, Write};
use std::path::Path;

use crate::config::{ConfigError, PolicyConfig, OPTION_NAMES};
use crate::policy::TurnPolicy;
use crate::protocol::parser::GoParams;
use crate::protocol::snapshot::{format_actions, parse_snapshot, Position, SnapshotError};

/// Holds the mutable state of the client between commands.
pub struct Engine {
    pub position: Option<Position>,
    pub turn: u32,
    config: PolicyConfig,
    policy: TurnPolicy,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(PolicyConfig::default())
    }
}

impl Engine {
    /// Creates a client with no snapshot, before the first turn.
    pub fn new(config: PolicyConfig) -> Self {
        Engine {
            position: None,
            turn: 0,
            policy: TurnPolicy::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn policy(&self) -> &TurnPolicy {
        &self.policy
    }

    /// Resets the snapshot, turn counter, and policy state for a new match.
    /// Configuration is kept.
    pub fn new_game(&mut self) {
        self.position = None;
        self.turn = 0;
        self.policy = TurnPolicy::new(self.config.clone());
    }

    /// Replaces the current snapshot. On error the previous one is kept.
    pub fn set_position(&mut self, json: &str) -> Result<(), SnapshotError> {
        let position = parse_snapshot(json)?;
        tracing::debug!(
            characters = position.board.characters.len(),
            slot = position.board.active_pair_index,
            "position set"
        );
        self.position = Some(position);
        Ok(())
    }

    /// Sets a configuration option. `ConfigFile` replaces the whole
    /// configuration with the file's contents.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let value = value.unwrap_or("");
        if name == "ConfigFile" {
            self.config = PolicyConfig::load(Path::new(value))?;
        } else {
            self.config.set_option(name, value)?;
        }
        self.policy.set_config(self.config.clone());
        tracing::info!(option = name, value, "option set");
        Ok(())
    }

    /// Handles the protocol handshake: id, options, protocol_version, cciok.
    pub fn handle_cci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name kaotic")?;
        writeln!(out, "id author kaotic")?;
        for (name, kind) in OPTION_NAMES {
            let default = self.config.option_value(name).unwrap_or_default();
            writeln!(out, "option name {} type {} default {}", name, kind, default)?;
        }
        writeln!(out, "option name ConfigFile type string default <empty>")?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "cciok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `teamdata` command.
    pub fn handle_teamdata<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "team {}", self.policy.team_data())?;
        out.flush()
    }

    /// Handles the `go` command: decides this turn's actions and writes
    /// them as an `actions` line. Without a snapshot the reply is empty.
    pub fn handle_go<W: Write>(&mut self, params: &GoParams, out: &mut W) -> io::Result<()> {
        let turn = params.turn.unwrap_or(self.turn.saturating_add(1));
        self.turn = turn;

        let actions = match &self.position {
            Some(pos) => self.policy.take_turn(turn, Vec::new(), &pos.board, &pos.roster),
            None => {
                tracing::warn!(turn, "go: no position set");
                Vec::new()
            }
        };

        writeln!(out, "actions {}", format_actions(&actions))?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CountryType;

    const SNAPSHOT: &str = r#"{"country":"uroda","team":["h","calmus","a"],"board":{"characters":[
        {"name":"h","class_type":"healer","rank_type":"generic","current_health":150,"max_health":400,"special_points":0,"position":{"x":0,"y":0}},
        {"name":"calmus","class_type":"attacker","rank_type":"leader","current_health":500,"max_health":500,"special_points":5,"position":{"x":0,"y":1}},
        {"name":"a","class_type":"attacker","rank_type":"generic","current_health":300,"max_health":300,"special_points":0,"position":{"x":0,"y":2}},
        {"name":"e0","class_type":"tank","rank_type":"generic","current_health":600,"max_health":600,"special_points":0,"position":{"x":1,"y":0}}
    ],"ordered_teams":[["calmus","e0"],["h",null],[null,"e0"]],"active_pair_index":0}}"#;

    fn output<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn new_engine_has_no_state() {
        let engine = Engine::default();
        assert!(engine.position.is_none());
        assert_eq!(engine.turn, 0);
        assert!(engine.policy().country().is_none());
    }

    #[test]
    fn set_position_valid_snapshot() {
        let mut engine = Engine::default();
        engine.set_position(SNAPSHOT).unwrap();
        let pos = engine.position.as_ref().unwrap();
        assert_eq!(pos.roster.country, CountryType::Uroda);
        assert_eq!(pos.board.characters.len(), 4);
    }

    #[test]
    fn set_position_invalid_keeps_previous() {
        let mut engine = Engine::default();
        engine.set_position(SNAPSHOT).unwrap();
        assert!(engine.set_position("garbage").is_err());
        assert!(engine.position.is_some());
    }

    #[test]
    fn go_counts_turns_and_latches_on_first() {
        let mut engine = Engine::default();
        engine.set_position(SNAPSHOT).unwrap();
        let text = output(|out| engine.handle_go(&GoParams::default(), out));
        assert_eq!(text.trim(), "actions USE_S2");
        assert_eq!(engine.turn, 1);
        assert_eq!(engine.policy().country(), Some(CountryType::Uroda));
    }

    #[test]
    fn go_with_explicit_turn() {
        let mut engine = Engine::default();
        engine.set_position(SNAPSHOT).unwrap();
        let params = GoParams { turn: Some(4) };
        output(|out| engine.handle_go(&params, out));
        assert_eq!(engine.turn, 4);
        output(|out| engine.handle_go(&GoParams::default(), out));
        assert_eq!(engine.turn, 5);
    }

    #[test]
    fn go_after_last_turn_number_does_not_overflow() {
        let mut engine = Engine::default();
        engine.set_position(SNAPSHOT).unwrap();
        output(|out| engine.handle_go(&GoParams { turn: Some(u32::MAX) }, out));
        let text = output(|out| engine.handle_go(&GoParams::default(), out));
        assert_eq!(engine.turn, u32::MAX);
        assert!(text.starts_with("actions "));
    }

    #[test]
    fn oversized_board_keeps_previous_position() {
        let mut engine = Engine::default();
        engine.set_position(SNAPSHOT).unwrap();
        let huge = SNAPSHOT.replace(
            "\"board\":{",
            "\"board\":{\"width\":70000,\"height\":70000,",
        );
        assert!(matches!(
            engine.set_position(&huge),
            Err(SnapshotError::InvalidBoardSize { .. })
        ));
        let text = output(|out| engine.handle_go(&GoParams::default(), out));
        assert_eq!(text.trim(), "actions USE_S2");
    }

    #[test]
    fn go_without_position_answers_empty() {
        let mut engine = Engine::default();
        let text = output(|out| engine.handle_go(&GoParams::default(), out));
        assert_eq!(text.trim(), "actions -");
    }

    #[test]
    fn go_for_empty_slot_answers_empty() {
        let mut engine = Engine::default();
        let json = SNAPSHOT.replace("\"active_pair_index\":0", "\"active_pair_index\":2");
        engine.set_position(&json).unwrap();
        let text = output(|out| engine.handle_go(&GoParams::default(), out));
        assert_eq!(text.trim(), "actions -");
    }

    #[test]
    fn option_changes_reach_policy() {
        let mut engine = Engine::default();
        engine.set_option("LeaderSpecialTwoCost", Some("6")).unwrap();
        engine.set_position(SNAPSHOT).unwrap();
        let text = output(|out| engine.handle_go(&GoParams::default(), out));
        assert_eq!(text.trim(), "actions USE_NM");
    }

    #[test]
    fn bad_option_is_rejected() {
        let mut engine = Engine::default();
        assert!(engine.set_option("Threads", Some("8")).is_err());
        assert!(engine.set_option("ConfigFile", Some("/nonexistent.json")).is_err());
        assert_eq!(engine.config(), &PolicyConfig::default());
    }

    #[test]
    fn new_game_resets_state_but_keeps_config() {
        let mut engine = Engine::default();
        engine.set_option("TeamName", Some("CHAOS")).unwrap();
        engine.set_position(SNAPSHOT).unwrap();
        output(|out| engine.handle_go(&GoParams::default(), out));
        engine.new_game();
        assert!(engine.position.is_none());
        assert_eq!(engine.turn, 0);
        assert!(engine.policy().country().is_none());
        assert_eq!(engine.config().team_name, "CHAOS");
    }

    #[test]
    fn handle_cci_outputs_handshake() {
        let engine = Engine::default();
        let text = output(|out| engine.handle_cci(out));
        assert!(text.contains("id name kaotic"));
        assert!(text.contains("option name HealerEmergencyHealth type spin default 200"));
        assert!(text.contains("protocol_version 1"));
        assert_eq!(text.lines().last(), Some("cciok"));
    }

    #[test]
    fn handle_teamdata_lists_picks() {
        let engine = Engine::default();
        let text = output(|out| engine.handle_teamdata(out));
        assert_eq!(text.trim(), "team KAOTIC gen_healer calmus gen_attacker");
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::default();
        let text = output(|out| engine.handle_isready(out));
        assert_eq!(text.trim(), "readyok");
    }
}
