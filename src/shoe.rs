use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank, Suit};
use crate::error::GameError;

/// A shuffled single-deck source of deals. Built fresh for every round and
/// discarded afterwards; never reshuffled mid-round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// All 52 cards, permuted with the caller-supplied RNG.
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut cards: Vec<Card> = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.shuffle(rng);
        Self { cards }
    }

    /// A shoe that deals the given cards in order. Used to drive
    /// deterministic rounds in tests.
    pub fn stacked(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Self { cards }
    }

    /// Removes and returns the next card. Exhaustion is a fatal
    /// internal-consistency error: one round never draws 52 cards.
    pub fn deal(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::ShoeExhausted)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
