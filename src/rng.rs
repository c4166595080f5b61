//! Pluggable randomness for dice and shuffles.
//!
//! The engine never reaches for an ambient generator: it draws every die
//! roll and every shuffle from the `RandomSource` it was built with, so a
//! seeded or scripted source makes a whole match reproducible.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::Card;

/// Source of dice rolls and deck shuffles.
pub trait RandomSource: Send {
    /// A uniform integer in `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// Uniformly permutes `cards` in place.
    fn shuffle_cards(&mut self, cards: &mut [Card]);
}

/// `SmallRng`-backed source, seeded or from entropy.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom { rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        SeededRandom { rng: SmallRng::from_entropy() }
    }

    /// Uses `seed` when nonzero, entropy otherwise.
    pub fn from_seed_or_entropy(seed: u64) -> Self {
        if seed != 0 {
            Self::new(seed)
        } else {
            Self::from_entropy()
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        // SliceRandom::shuffle is a Fisher-Yates shuffle.
        cards.shuffle(&mut self.rng);
    }
}

/// Replays a fixed sequence of die values, then falls back to a seeded
/// generator. Shuffles always use the seeded generator.
///
/// Each attack consumes two values: attacker first, then defender.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: VecDeque<u8>,
    fallback: SeededRandom,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        ScriptedRolls { rolls: rolls.into_iter().collect(), fallback: SeededRandom::new(0x5eed) }
    }

    /// Builds a script from `(attacker, defender)` pairs.
    pub fn exchanges(pairs: &[(u8, u8)]) -> Self {
        Self::new(pairs.iter().flat_map(|&(a, d)| [a, d]))
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn roll_die(&mut self) -> u8 {
        match self.rolls.pop_front() {
            Some(v) => v.clamp(1, 6),
            None => self.fallback.roll_die(),
        }
    }

    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        self.fallback.shuffle_cards(cards);
    }
}
