//! Game state representation.
//!
//! Holds the complete mutable snapshot of a match: territory ownership and
//! troop counts, seated players and their hands, the turn pointer, and the
//! current phase. Field names serialize in the camelCase form observers expect.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::graph::TerritoryId;

/// Identifier of a seated player.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

/// The stage of the current player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Placeholder; matches start directly in `Reinforce`.
    Setup,
    Reinforce,
    Attack,
    Fortify,
}

impl Phase {
    /// Returns the upper-case wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Setup => "SETUP",
            Phase::Reinforce => "REINFORCE",
            Phase::Attack => "ATTACK",
            Phase::Fortify => "FORTIFY",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ownership and garrison of one territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryState {
    pub owner: Option<PlayerId>,
    pub troops: u32,
}

impl TerritoryState {
    pub fn is_owned_by(&self, player: &PlayerId) -> bool {
        self.owner.as_ref() == Some(player)
    }
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub cards: Vec<Card>,
    #[serde(rename = "isAlive")]
    pub alive: bool,
    #[serde(rename = "isAi")]
    pub automated: bool,
}

/// Complete match snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub territories: BTreeMap<TerritoryId, TerritoryState>,
    pub players: BTreeMap<PlayerId, PlayerState>,
    /// Seating order, fixed once the match starts.
    pub player_order: Vec<PlayerId>,
    pub current_player_index: usize,
    #[serde(rename = "currentPhase")]
    pub phase: Phase,
    /// Troops the current player still has to place this turn.
    pub unplaced_troops: u32,
    /// Set by a conquest; decides the card award when the turn ends.
    pub conquered_this_turn: bool,
    /// Set once a single live player remains.
    pub winner: Option<PlayerId>,
    /// Number of undrawn cards; the deck itself is hidden from observers.
    pub deck_size: usize,
}

impl GameState {
    /// The player whose turn it is.
    pub fn current_player(&self) -> &PlayerId {
        &self.player_order[self.current_player_index]
    }

    pub fn territory(&self, id: &TerritoryId) -> Option<&TerritoryState> {
        self.territories.get(id)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&PlayerState> {
        self.players.get(id)
    }

    /// Territories owned by `player`, in id order.
    pub fn owned_by<'a>(&'a self, player: &'a PlayerId) -> impl Iterator<Item = &'a TerritoryId> + 'a {
        self.territories
            .iter()
            .filter(move |(_, t)| t.is_owned_by(player))
            .map(|(id, _)| id)
    }

    pub fn territory_count(&self, player: &PlayerId) -> usize {
        self.owned_by(player).count()
    }

    /// Sum of troops across every owned territory.
    pub fn total_troops(&self) -> u32 {
        self.territories.values().filter(|t| t.owner.is_some()).map(|t| t.troops).sum()
    }

    /// Players still in the match, in seating order.
    pub fn live_players(&self) -> impl Iterator<Item = &PlayerId> {
        self.player_order
            .iter()
            .filter(move |id| self.players.get(*id).is_some_and(|p| p.alive))
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}
