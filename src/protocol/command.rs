//! Inbound room commands.
//!
//! One JSON object per line, tagged by `type`. Every command carries `from`,
//! the player id of the connection that sent it.

use serde::{Deserialize, Serialize};

use crate::board::{CardId, PlayerId, TerritoryId};

/// A parsed client-to-room command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Take a seat in the lobby.
    JoinGame {
        from: PlayerId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Seat a new automated player.
    AddAi { from: PlayerId },

    /// Deal the board to everyone seated and begin the match.
    StartGame { from: PlayerId },

    ActionReinforce {
        from: PlayerId,
        #[serde(rename = "territoryId")]
        territory_id: TerritoryId,
        amount: u32,
    },

    ActionAttack {
        from: PlayerId,
        #[serde(rename = "fromId")]
        from_id: TerritoryId,
        #[serde(rename = "toId")]
        to_id: TerritoryId,
    },

    ActionTrade {
        from: PlayerId,
        #[serde(rename = "cardIds")]
        card_ids: Vec<CardId>,
    },

    /// Ends the attack phase, or skips fortify, depending on the phase.
    ActionEndPhase { from: PlayerId },

    ActionFortify {
        from: PlayerId,
        #[serde(rename = "fromId")]
        from_id: TerritoryId,
        #[serde(rename = "toId")]
        to_id: TerritoryId,
        amount: u32,
    },

    /// Leave the lobby. Has no effect on a match in progress.
    Leave { from: PlayerId },
}

impl Command {
    /// The player who sent the command.
    pub fn sender(&self) -> &PlayerId {
        match self {
            Command::JoinGame { from, .. }
            | Command::AddAi { from }
            | Command::StartGame { from }
            | Command::ActionReinforce { from, .. }
            | Command::ActionAttack { from, .. }
            | Command::ActionTrade { from, .. }
            | Command::ActionEndPhase { from }
            | Command::ActionFortify { from, .. }
            | Command::Leave { from } => from,
        }
    }
}

/// Error from reading a command line.
#[derive(Debug, thiserror::Error)]
#[error("malformed command: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Parses a single line of input into a `Command`.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}
