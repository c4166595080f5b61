//! Trade-in set search.

use crate::board::{is_valid_set, Card, CardId};

/// Finds the first tradeable set in hand order, scanning index triples
/// lexicographically.
pub fn find_trade_set(hand: &[Card]) -> Option<[CardId; 3]> {
    let n = hand.len();
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                if is_valid_set([hand[i].kind, hand[j].kind, hand[k].kind]) {
                    return Some([hand[i].id, hand[j].id, hand[k].id]);
                }
            }
        }
    }
    None
}
