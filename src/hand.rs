use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Best value of a hand plus whether an ace still counts as 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandValue {
    pub total: u8,
    pub soft: bool,
}

/// Evaluate a hand: aces start at 11 and are downgraded to 1 one at a time
/// while the total exceeds 21. The hand is soft when an ace survives at 11.
/// Pure and order-invariant; an empty hand is (0, hard).
pub fn hand_value(cards: &[Card]) -> HandValue {
    let mut total: u8 = 0;
    let mut elevens: u8 = 0;

    for card in cards {
        if card.is_ace() {
            elevens += 1;
        }
        total += card.value();
    }

    while total > 21 && elevens > 0 {
        total -= 10;
        elevens -= 1;
    }

    HandValue {
        total,
        soft: elevens > 0,
    }
}

/// A natural (blackjack): exactly two cards totaling 21.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards).total == 21
}

pub fn is_busted(cards: &[Card]) -> bool {
    hand_value(cards).total > 21
}

/// Cards held by one participant during a round. Append-only; dropped when
/// the round ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> HandValue {
        hand_value(&self.cards)
    }

    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
