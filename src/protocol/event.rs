//! Outbound room events, one JSON object per line, tagged by `type`.

use serde::Serialize;

use crate::board::{GameState, PlayerId};
use crate::engine::Seat;
use crate::resolve::AttackResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The seated players, in seat order.
    LobbyUpdate { players: Vec<Seat> },

    /// The opening snapshot.
    GameStart(GameState),

    /// The full snapshot after an accepted move.
    GameUpdate(GameState),

    /// Dice and outcome of one attack exchange.
    AttackResult(AttackResult),

    /// A command that was refused, addressed to its sender.
    Rejected { to: PlayerId, code: &'static str, reason: String },

    GameOver { winner: PlayerId },
}

impl Event {
    /// Serializes the event as a single JSON line (without the newline).
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
