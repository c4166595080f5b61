//! Card trade-ins.
//!
//! A trade exchanges three cards from the current player's hand for
//! reinforcements. The cards go back into the deck, which is reshuffled.

use crate::board::{is_valid_set, Card, CardId, Deck, GameState, PlayerId, TerritoryId};
use crate::config::RulesConfig;
use crate::error::MoveError;
use crate::rng::RandomSource;

/// What a successful trade granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOutcome {
    /// Troops added to the unplaced pool.
    pub pool_bonus: u32,
    /// Owned territories that received the per-card garrison bonus.
    pub garrisoned: Vec<TerritoryId>,
}

/// Validates a trade request against `player`'s hand without mutating.
pub fn validate_trade(state: &GameState, player: &PlayerId, card_ids: &[CardId]) -> Result<(), MoveError> {
    if card_ids.len() != 3 {
        return Err(MoveError::WrongCardCount(card_ids.len()));
    }
    for (i, id) in card_ids.iter().enumerate() {
        if card_ids[..i].contains(id) {
            return Err(MoveError::DuplicateCard(*id));
        }
    }
    let hand = &state.player(player).ok_or_else(|| MoveError::UnknownPlayer(player.clone()))?.cards;

    let mut kinds = Vec::with_capacity(3);
    for id in card_ids {
        let card = hand.iter().find(|c| c.id == *id).ok_or(MoveError::CardNotHeld(*id))?;
        kinds.push(card.kind);
    }
    if !is_valid_set([kinds[0], kinds[1], kinds[2]]) {
        return Err(MoveError::InvalidCardSet);
    }
    Ok(())
}

/// Performs a trade. Does not change phase or turn.
pub fn trade_cards(
    state: &mut GameState,
    deck: &mut Deck,
    rules: &RulesConfig,
    random: &mut dyn RandomSource,
    player: &PlayerId,
    card_ids: &[CardId],
) -> Result<TradeOutcome, MoveError> {
    validate_trade(state, player, card_ids)?;

    let traded: Vec<Card> = match state.players.get_mut(player) {
        Some(p) => {
            let (traded, kept): (Vec<Card>, Vec<Card>) =
                p.cards.drain(..).partition(|c| card_ids.contains(&c.id));
            p.cards = kept;
            traded
        }
        None => return Err(MoveError::UnknownPlayer(player.clone())),
    };

    let mut garrisoned = Vec::new();
    for card in &traded {
        let Some(tid) = &card.territory_id else { continue };
        if let Some(t) = state.territories.get_mut(tid) {
            if t.is_owned_by(player) {
                t.troops += rules.territory_card_bonus;
                garrisoned.push(tid.clone());
            }
        }
    }

    deck.return_and_shuffle(traded, random);
    state.deck_size = deck.len();
    state.unplaced_troops += rules.trade_bonus;

    Ok(TradeOutcome { pool_bonus: rules.trade_bonus, garrisoned })
}
