//! Cards and the draw pile.
//!
//! Every card lives in exactly one place at a time: the deck or one
//! player's hand. Cards move deck -> hand on a conquest-turn award and
//! hand -> deck on a trade-in; they are never created or destroyed after
//! the deck is built.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::graph::{TerritoryGraph, TerritoryId};
use crate::rng::RandomSource;

/// Identifier unique across the deck and all hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The symbol on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    Infantry,
    Cavalry,
    Artillery,
    Wild,
}

/// The three non-wild kinds, in deck-building order.
pub const TRADEABLE_KINDS: [CardKind; 3] = [CardKind::Infantry, CardKind::Cavalry, CardKind::Artillery];

impl CardKind {
    pub const fn is_wild(self) -> bool {
        matches!(self, CardKind::Wild)
    }
}

/// A single card, optionally bound to a territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    #[serde(rename = "type")]
    pub kind: CardKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub territory_id: Option<TerritoryId>,
}

/// Returns true if three kinds form a tradeable set.
///
/// A set is three of one kind, one of each non-wild kind, or any triple that
/// includes a wildcard.
pub fn is_valid_set(kinds: [CardKind; 3]) -> bool {
    if kinds.iter().any(|k| k.is_wild()) {
        return true;
    }
    let [a, b, c] = kinds;
    let all_same = a == b && b == c;
    let all_different = a != b && b != c && a != c;
    all_same || all_different
}

/// The undrawn cards. The last element is the top of the pile.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds one card per territory, cycling through the tradeable kinds,
    /// plus `wildcards` unbound wildcards, then shuffles once.
    pub fn standard(graph: &TerritoryGraph, wildcards: u32, random: &mut dyn RandomSource) -> Self {
        let mut cards: Vec<Card> = graph
            .territories()
            .enumerate()
            .map(|(i, t)| Card {
                id: CardId(i as u32),
                kind: TRADEABLE_KINDS[i % TRADEABLE_KINDS.len()],
                territory_id: Some(t.clone()),
            })
            .collect();
        let base = cards.len() as u32;
        for w in 0..wildcards {
            cards.push(Card { id: CardId(base + w), kind: CardKind::Wild, territory_id: None });
        }
        random.shuffle_cards(&mut cards);
        Deck { cards }
    }

    /// Wraps an explicit pile without shuffling. The last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes the top card, if any.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Returns traded cards to the pile and reshuffles the whole pile.
    pub fn return_and_shuffle(&mut self, returned: Vec<Card>, random: &mut dyn RandomSource) {
        self.cards.extend(returned);
        random.shuffle_cards(&mut self.cards);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
