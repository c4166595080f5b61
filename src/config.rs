//! Rules configuration.
//!
//! Every tunable constant of the rules lives here. Unspecified fields in a
//! JSON rules file fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// How fortify validates the path between source and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FortifyReach {
    /// Source and destination must share a border.
    Adjacent,
    /// Any chain of the player's own territories connects them.
    Path,
}

/// Tunable rules for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Troops placed on every territory at match start.
    pub initial_troops: u32,
    /// Floor of the per-turn reinforcement allotment.
    pub min_reinforcement: u32,
    /// One reinforcement troop per this many owned territories.
    pub territories_per_troop: u32,
    /// Troops added to the unplaced pool by a trade-in.
    pub trade_bonus: u32,
    /// Troops added directly to an owned territory named on a traded card.
    pub territory_card_bonus: u32,
    /// Add each fully owned continent's bonus to the allotment.
    pub continent_bonuses: bool,
    /// Fortify reachability rule.
    pub fortify: FortifyReach,
    /// Wildcards added to the deck.
    pub wildcards: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            initial_troops: 3,
            min_reinforcement: 3,
            territories_per_troop: 3,
            trade_bonus: 5,
            territory_card_bonus: 2,
            continent_bonuses: false,
            fortify: FortifyReach::Path,
            wildcards: 2,
        }
    }
}

/// Errors loading a rules file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rules JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("territories_per_troop must be at least 1")]
    ZeroDivisor,
}

impl RulesConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: RulesConfig = serde_json::from_str(json)?;
        if rules.territories_per_troop == 0 {
            return Err(ConfigError::ZeroDivisor);
        }
        Ok(rules)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&json)
    }
}
