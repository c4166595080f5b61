//! Rejection reasons for engine operations.
//!
//! A rejected operation never mutates state; the reason tells the caller
//! which check failed so it can be reported back to the player.

use crate::board::{CardId, Phase, PlayerId, TerritoryId};

/// Why a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("the match is over")]
    GameOver,

    #[error("unknown player '{0}'")]
    UnknownPlayer(PlayerId),

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("operation requires phase {expected}, current phase is {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("unknown territory '{0}'")]
    UnknownTerritory(TerritoryId),

    #[error("territory '{0}' is not owned by the acting player")]
    NotOwner(TerritoryId),

    #[error("territory '{0}' is already owned by the acting player")]
    OwnTerritory(TerritoryId),

    #[error("'{from}' does not border '{to}'")]
    NotAdjacent { from: TerritoryId, to: TerritoryId },

    #[error("no chain of owned territories connects '{from}' to '{to}'")]
    NotConnected { from: TerritoryId, to: TerritoryId },

    #[error("'{territory}' has {troops} troops, which is not enough")]
    InsufficientTroops { territory: TerritoryId, troops: u32 },

    #[error("invalid troop amount {0}")]
    InvalidAmount(u32),

    #[error("requested {requested} troops but only {available} are unplaced")]
    NotEnoughUnplaced { requested: u32, available: u32 },

    #[error("a trade needs exactly 3 cards, got {0}")]
    WrongCardCount(usize),

    #[error("card {0} listed more than once")]
    DuplicateCard(CardId),

    #[error("card {0} is not in the acting player's hand")]
    CardNotHeld(CardId),

    #[error("cards do not form a tradeable set")]
    InvalidCardSet,
}

impl MoveError {
    /// Stable machine-readable code for the wire.
    pub const fn code(&self) -> &'static str {
        match self {
            MoveError::GameOver => "game_over",
            MoveError::UnknownPlayer(_) => "unknown_player",
            MoveError::NotYourTurn(_) => "not_your_turn",
            MoveError::WrongPhase { .. } => "wrong_phase",
            MoveError::UnknownTerritory(_) => "unknown_territory",
            MoveError::NotOwner(_) => "not_owner",
            MoveError::OwnTerritory(_) => "own_territory",
            MoveError::NotAdjacent { .. } => "not_adjacent",
            MoveError::NotConnected { .. } => "not_connected",
            MoveError::InsufficientTroops { .. } => "insufficient_troops",
            MoveError::InvalidAmount(_) => "invalid_amount",
            MoveError::NotEnoughUnplaced { .. } => "not_enough_unplaced",
            MoveError::WrongCardCount(_) => "wrong_card_count",
            MoveError::DuplicateCard(_) => "duplicate_card",
            MoveError::CardNotHeld(_) => "card_not_held",
            MoveError::InvalidCardSet => "invalid_card_set",
        }
    }
}

/// Why a match could not be created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("a match needs at least 2 seats, got {0}")]
    NotEnoughPlayers(usize),

    #[error("{players} seats cannot share {territories} territories")]
    TooManyPlayers { players: usize, territories: usize },

    #[error("seat '{0}' appears more than once")]
    DuplicateSeat(PlayerId),

    #[error("the territory graph is empty")]
    EmptyGraph,

    #[error("territory '{0}' has no assignment")]
    Unassigned(TerritoryId),

    #[error("assignment names territory '{0}' which is not on the map")]
    UnknownTerritory(TerritoryId),

    #[error("assignment names unseated player '{0}'")]
    UnknownOwner(PlayerId),

    #[error("territory '{0}' must start with at least 1 troop")]
    EmptyGarrison(TerritoryId),
}

/// Why the room refused a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("a match is already in progress")]
    GameInProgress,

    #[error("no match has been started")]
    NoGame,

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Move(#[from] MoveError),
}

impl RoomError {
    pub const fn code(&self) -> &'static str {
        match self {
            RoomError::GameInProgress => "game_in_progress",
            RoomError::NoGame => "no_game",
            RoomError::Setup(_) => "setup_failed",
            RoomError::Move(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = MoveError::NotAdjacent { from: "t1".into(), to: "t5".into() };
        assert_eq!(e.to_string(), "'t1' does not border 't5'");
        assert_eq!(e.code(), "not_adjacent");

        let e = MoveError::WrongPhase { expected: Phase::Attack, actual: Phase::Reinforce };
        assert_eq!(e.to_string(), "operation requires phase ATTACK, current phase is REINFORCE");
    }

    #[test]
    fn room_errors_forward_move_codes() {
        let e = RoomError::from(MoveError::NotYourTurn("p2".into()));
        assert_eq!(e.code(), "not_your_turn");
        assert_eq!(e.to_string(), "it is not p2's turn");
        assert_eq!(RoomError::from(SetupError::NotEnoughPlayers(1)).code(), "setup_failed");
    }
}
