//! Legal move generation.
//!
//! Enumerates legal attacks, fortify destinations, and tradeable card sets
//! for a player in the current position, plus random picks among them.

pub mod attack;
pub mod cards;

use rand::Rng;

use crate::board::{GameState, PlayerId, TerritoryGraph, TerritoryId};

pub use attack::{attack_sources, attack_targets, fortify_destinations, legal_attacks};
pub use cards::find_trade_set;

/// Picks a uniformly random owned territory.
pub fn random_owned(state: &GameState, player: &PlayerId, rng: &mut impl Rng) -> Option<TerritoryId> {
    let owned: Vec<&TerritoryId> = state.owned_by(player).collect();
    if owned.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..owned.len());
    Some(owned[idx].clone())
}

/// Picks a random attack: first a uniformly random source among those with
/// a target, then a uniformly random target of that source.
pub fn random_attack(
    state: &GameState,
    graph: &TerritoryGraph,
    player: &PlayerId,
    rng: &mut impl Rng,
) -> Option<(TerritoryId, TerritoryId)> {
    let sources = attack_sources(state, graph, player);
    if sources.is_empty() {
        return None;
    }
    let from = sources[rng.gen_range(0..sources.len())].clone();
    let targets = attack_targets(state, graph, player, &from);
    let to = targets[rng.gen_range(0..targets.len())].clone();
    Some((from, to))
}
