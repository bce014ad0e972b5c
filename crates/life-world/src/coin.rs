//! Coin flips for settling seeding collisions.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of fair coin flips.
///
/// `true` keeps the organism already in a cell, `false` lets the newcomer
/// take its place.
pub trait CoinFlip {
    fn keep_existing(&mut self) -> bool;
}

/// Fair coin backed by a seeded ChaCha8 generator
#[derive(Debug, Clone)]
pub struct SeededCoin {
    rng: ChaCha8Rng,
}

impl SeededCoin {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl CoinFlip for SeededCoin {
    fn keep_existing(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Coin that replays a fixed sequence of outcomes, then keeps existing
/// occupants once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCoin {
    outcomes: VecDeque<bool>,
    flips: usize,
}

impl ScriptedCoin {
    pub fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            flips: 0,
        }
    }

    /// Number of times the coin has been flipped
    pub fn flips(&self) -> usize {
        self.flips
    }
}

impl CoinFlip for ScriptedCoin {
    fn keep_existing(&mut self) -> bool {
        self.flips += 1;
        self.outcomes.pop_front().unwrap_or(true)
    }
}

impl<C: CoinFlip + ?Sized> CoinFlip for &mut C {
    fn keep_existing(&mut self) -> bool {
        (**self).keep_existing()
    }
}
