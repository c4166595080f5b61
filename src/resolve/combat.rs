//! Attack resolution.
//!
//! One attack is a single exchange: one die for the attacker, one for the
//! defender, ties to the defender. Exactly one side loses exactly one troop,
//! except on conquest, where the occupying troop also leaves the source.

use serde::Serialize;

use crate::board::{GameState, PlayerId, TerritoryGraph, TerritoryId};
use crate::error::MoveError;

/// Outcome of one attack, as reported to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackResult {
    pub attacker: PlayerId,
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub attacker_die: u8,
    pub defender_die: u8,
    pub conquered: bool,
    /// The defender, if this conquest took their last territory.
    pub eliminated: Option<PlayerId>,
}

/// Effect of one exchange on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub conquered: bool,
    /// Previous owner of the target.
    pub defender: Option<PlayerId>,
}

/// Checks every board-level precondition of an attack without mutating.
pub fn validate_attack(
    state: &GameState,
    graph: &TerritoryGraph,
    player: &PlayerId,
    from: &TerritoryId,
    to: &TerritoryId,
) -> Result<(), MoveError> {
    let source = state.territory(from).ok_or_else(|| MoveError::UnknownTerritory(from.clone()))?;
    let target = state.territory(to).ok_or_else(|| MoveError::UnknownTerritory(to.clone()))?;

    if !source.is_owned_by(player) {
        return Err(MoveError::NotOwner(from.clone()));
    }
    if target.is_owned_by(player) {
        return Err(MoveError::OwnTerritory(to.clone()));
    }
    if !graph.is_adjacent(from, to) {
        return Err(MoveError::NotAdjacent { from: from.clone(), to: to.clone() });
    }
    // One troop always stays behind to hold the source.
    if source.troops < 2 {
        return Err(MoveError::InsufficientTroops { territory: from.clone(), troops: source.troops });
    }
    Ok(())
}

/// Applies one exchange with the given dice. Assumes `validate_attack` passed.
pub fn apply_exchange(
    state: &mut GameState,
    player: &PlayerId,
    from: &TerritoryId,
    to: &TerritoryId,
    attacker_die: u8,
    defender_die: u8,
) -> Exchange {
    let mut exchange = Exchange { conquered: false, defender: None };

    if attacker_die > defender_die {
        if let Some(target) = state.territories.get_mut(to) {
            target.troops = target.troops.saturating_sub(1);
            if target.troops == 0 {
                exchange.defender = target.owner.replace(player.clone());
                target.troops = 1;
                exchange.conquered = true;
            }
        }
        if exchange.conquered {
            if let Some(source) = state.territories.get_mut(from) {
                source.troops -= 1;
            }
            state.conquered_this_turn = true;
        }
    } else if let Some(source) = state.territories.get_mut(from) {
        source.troops -= 1;
    }

    exchange
}
