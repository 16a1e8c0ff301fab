//! Policy configuration.
//!
//! Every threshold the turn policy consults lives here. Defaults reproduce
//! the fixed behavior; a JSON file or protocol options may override them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Thresholds and identity for the turn policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Display name sent at team registration.
    pub team_name: String,
    /// Health fraction at or above which a character counts as healthy.
    pub healthy_ratio: f64,
    /// Absolute health below which the healer always uses its first special.
    pub healer_emergency_health: u32,
    /// Special points the healer needs before using its second special.
    pub healer_special_two_cost: u32,
    /// Special points the leader needs before using its second special.
    pub leader_special_two_cost: u32,
    /// Special points the attacker needs before using its first special.
    pub attacker_special_one_cost: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            team_name: "KAOTIC".to_string(),
            healthy_ratio: 0.50,
            healer_emergency_health: 200,
            healer_special_two_cost: 3,
            leader_special_two_cost: 5,
            attacker_special_one_cost: 1,
        }
    }
}

/// Option names accepted by [`PolicyConfig::set_option`], with their
/// protocol type.
pub const OPTION_NAMES: [(&str, &str); 6] = [
    ("TeamName", "string"),
    ("HealthyRatio", "string"),
    ("HealerEmergencyHealth", "spin"),
    ("HealerSpecialTwoCost", "spin"),
    ("LeaderSpecialTwoCost", "spin"),
    ("AttackerSpecialOneCost", "spin"),
];

impl PolicyConfig {
    /// Parses a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: PolicyConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// Checks the values every source must respect: the team name is one
    /// non-empty token and the healthy ratio lies in `0..=1`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.team_name.is_empty() || self.team_name.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                name: "TeamName".to_string(),
                value: self.team_name.clone(),
            });
        }
        if !(0.0..=1.0).contains(&self.healthy_ratio) {
            return Err(ConfigError::InvalidValue {
                name: "HealthyRatio".to_string(),
                value: self.healthy_ratio.to_string(),
            });
        }
        Ok(())
    }

    /// Applies a single named option. The config is left untouched on error.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        let mut next = self.clone();
        match name {
            "TeamName" => next.team_name = value.to_string(),
            "HealthyRatio" => next.healthy_ratio = value.parse().map_err(|_| invalid())?,
            "HealerEmergencyHealth" => {
                next.healer_emergency_health = value.parse().map_err(|_| invalid())?;
            }
            "HealerSpecialTwoCost" => {
                next.healer_special_two_cost = value.parse().map_err(|_| invalid())?;
            }
            "LeaderSpecialTwoCost" => {
                next.leader_special_two_cost = value.parse().map_err(|_| invalid())?;
            }
            "AttackerSpecialOneCost" => {
                next.attacker_special_one_cost = value.parse().map_err(|_| invalid())?;
            }
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Returns the current value of a named option as protocol text.
    pub fn option_value(&self, name: &str) -> Option<String> {
        match name {
            "TeamName" => Some(self.team_name.clone()),
            "HealthyRatio" => Some(self.healthy_ratio.to_string()),
            "HealerEmergencyHealth" => Some(self.healer_emergency_health.to_string()),
            "HealerSpecialTwoCost" => Some(self.healer_special_two_cost.to_string()),
            "LeaderSpecialTwoCost" => Some(self.leader_special_two_cost.to_string()),
            "AttackerSpecialOneCost" => Some(self.attacker_special_one_cost.to_string()),
            _ => None,
        }
    }
}
