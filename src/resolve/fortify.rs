//! End-of-turn troop transfer between two owned territories.

use crate::board::{GameState, PlayerId, TerritoryGraph, TerritoryId};
use crate::config::FortifyReach;
use crate::error::MoveError;

/// Checks that `amount` troops may move from `from` to `to`.
pub fn validate_fortify(
    state: &GameState,
    graph: &TerritoryGraph,
    reach: FortifyReach,
    player: &PlayerId,
    from: &TerritoryId,
    to: &TerritoryId,
    amount: u32,
) -> Result<(), MoveError> {
    let source = state.territory(from).ok_or_else(|| MoveError::UnknownTerritory(from.clone()))?;
    let dest = state.territory(to).ok_or_else(|| MoveError::UnknownTerritory(to.clone()))?;

    if !source.is_owned_by(player) {
        return Err(MoveError::NotOwner(from.clone()));
    }
    if !dest.is_owned_by(player) {
        return Err(MoveError::NotOwner(to.clone()));
    }
    if amount == 0 || from == to {
        return Err(MoveError::InvalidAmount(amount));
    }
    // The source keeps at least one troop.
    if amount >= source.troops {
        return Err(MoveError::InsufficientTroops { territory: from.clone(), troops: source.troops });
    }

    match reach {
        FortifyReach::Adjacent => {
            if !graph.is_adjacent(from, to) {
                return Err(MoveError::NotAdjacent { from: from.clone(), to: to.clone() });
            }
        }
        FortifyReach::Path => {
            let owned = |t: &TerritoryId| state.territory(t).is_some_and(|s| s.is_owned_by(player));
            if !graph.connected_through(from, to, owned) {
                return Err(MoveError::NotConnected { from: from.clone(), to: to.clone() });
            }
        }
    }
    Ok(())
}

/// Moves the troops. Assumes `validate_fortify` passed.
pub fn apply_fortify(state: &mut GameState, from: &TerritoryId, to: &TerritoryId, amount: u32) {
    if let Some(source) = state.territories.get_mut(from) {
        source.troops -= amount;
    }
    if let Some(dest) = state.territories.get_mut(to) {
        dest.troops += amount;
    }
}
