//! Phase sequencing and turn advancement.
//!
//! Phase flow within a turn:
//! - Reinforce -> Attack (when the unplaced pool is emptied)
//! - Attack    -> Fortify (explicit end of attacks)
//! - Fortify   -> next player's Reinforce (fortify or skip)

use log::info;

use crate::board::{CardId, Deck, GameState, Phase, PlayerId, TerritoryGraph};
use crate::config::RulesConfig;

use super::reinforce::reinforcement_allotment;

/// What happened when a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnChange {
    pub previous: PlayerId,
    pub next: PlayerId,
    /// Card drawn by the previous player for conquering this turn.
    pub awarded: Option<CardId>,
    pub reinforcements: u32,
}

/// Index of the next live player after the current one, wrapping around.
/// Returns the current index if nobody else is alive.
pub fn next_live_index(state: &GameState) -> usize {
    let n = state.player_order.len();
    (1..=n)
        .map(|step| (state.current_player_index + step) % n)
        .find(|&i| {
            state
                .players
                .get(&state.player_order[i])
                .is_some_and(|p| p.alive)
        })
        .unwrap_or(state.current_player_index)
}

/// Ends the current player's turn: awards a card for a conquest, rotates to
/// the next live player, and computes their reinforcements.
pub fn end_turn(
    state: &mut GameState,
    deck: &mut Deck,
    graph: &TerritoryGraph,
    rules: &RulesConfig,
) -> TurnChange {
    let previous = state.current_player().clone();

    let mut awarded = None;
    if state.conquered_this_turn {
        if let Some(card) = deck.draw() {
            awarded = Some(card.id);
            if let Some(p) = state.players.get_mut(&previous) {
                p.cards.push(card);
            }
        }
        state.deck_size = deck.len();
    }

    state.current_player_index = next_live_index(state);
    state.conquered_this_turn = false;

    let next = state.current_player().clone();
    let reinforcements = reinforcement_allotment(state, graph, rules, &next);
    state.unplaced_troops = reinforcements;
    state.phase = opening_phase(reinforcements);

    info!("turn passes from {previous} to {next} ({reinforcements} reinforcements)");
    TurnChange { previous, next, awarded, reinforcements }
}

/// The phase a turn opens in. With nothing to place there is no
/// reinforcement step to exhaust, so the turn opens in attack.
pub fn opening_phase(reinforcements: u32) -> Phase {
    if reinforcements == 0 {
        Phase::Attack
    } else {
        Phase::Reinforce
    }
}

/// Marks `player` eliminated if they hold no territory. Returns true if this
/// call eliminated them.
pub fn eliminate_if_empty(state: &mut GameState, player: &PlayerId) -> bool {
    if state.territory_count(player) > 0 {
        return false;
    }
    match state.players.get_mut(player) {
        Some(p) if p.alive => {
            p.alive = false;
            info!("{player} has been eliminated");
            true
        }
        _ => false,
    }
}

/// Records and returns the winner once exactly one live player remains.
pub fn settle_winner(state: &mut GameState) -> Option<PlayerId> {
    if state.winner.is_none() {
        let only = {
            let mut live = state.live_players();
            match (live.next(), live.next()) {
                (Some(player), None) => Some(player.clone()),
                _ => None,
            }
        };
        if let Some(winner) = only {
            info!("{winner} wins the match");
            state.winner = Some(winner);
        }
    }
    state.winner.clone()
}
