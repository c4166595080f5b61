//! Attack and fortify move generation.
//!
//! Enumerates the territory pairs a player could legally name in an attack
//! or fortify call from the current position.

use crate::board::{GameState, PlayerId, TerritoryGraph, TerritoryId};
use crate::config::FortifyReach;

/// Enemy or unowned territories bordering `from`.
pub fn attack_targets(state: &GameState, graph: &TerritoryGraph, player: &PlayerId, from: &TerritoryId) -> Vec<TerritoryId> {
    graph
        .neighbors(from)
        .filter(|n| state.territory(n).is_some_and(|t| !t.is_owned_by(player)))
        .cloned()
        .collect()
}

/// Owned territories with at least 2 troops and at least one target.
pub fn attack_sources(state: &GameState, graph: &TerritoryGraph, player: &PlayerId) -> Vec<TerritoryId> {
    state
        .territories
        .iter()
        .filter(|(_, t)| t.is_owned_by(player) && t.troops >= 2)
        .map(|(id, _)| id)
        .filter(|id| !attack_targets(state, graph, player, id).is_empty())
        .cloned()
        .collect()
}

/// Every legal `(from, to)` attack pair.
pub fn legal_attacks(state: &GameState, graph: &TerritoryGraph, player: &PlayerId) -> Vec<(TerritoryId, TerritoryId)> {
    attack_sources(state, graph, player)
        .into_iter()
        .flat_map(|from| {
            attack_targets(state, graph, player, &from)
                .into_iter()
                .map(move |to| (from.clone(), to))
        })
        .collect()
}

/// Owned territories that could receive troops from `from` under `reach`.
/// Empty if `from` cannot spare a troop.
pub fn fortify_destinations(
    state: &GameState,
    graph: &TerritoryGraph,
    reach: FortifyReach,
    player: &PlayerId,
    from: &TerritoryId,
) -> Vec<TerritoryId> {
    let spare = state.territory(from).is_some_and(|t| t.is_owned_by(player) && t.troops >= 2);
    if !spare {
        return Vec::new();
    }
    let owned = |t: &TerritoryId| state.territory(t).is_some_and(|s| s.is_owned_by(player));
    match reach {
        FortifyReach::Adjacent => graph.neighbors(from).filter(|t| owned(t)).cloned().collect(),
        FortifyReach::Path => graph.reachable_from(from, owned),
    }
}
