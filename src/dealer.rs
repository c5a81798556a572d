//! Fixed dealer policy: hit below 17, stand on 17 and above, including
//! soft 17.

use log::debug;

use crate::card::Card;
use crate::error::GameError;
use crate::hand::{hand_value, Hand};
use crate::shoe::Shoe;

pub fn should_hit(cards: &[Card]) -> bool {
    let value = hand_value(cards);
    // Standing on soft 17 is a fixed house rule here, so softness never
    // changes the decision: 17+ always stands.
    value.total < 17
}

/// Plays the dealer hand to completion, drawing from the shoe until the
/// policy stands or the hand busts. Returns the cards drawn, in order, for
/// the front end to render. Deterministic given the shoe contents.
pub fn play(shoe: &mut Shoe, hand: &mut Hand) -> Result<Vec<Card>, GameError> {
    let mut drawn = Vec::new();
    while should_hit(hand.cards()) {
        let card = shoe.deal()?;
        debug!("dealer draws {card}");
        hand.push(card);
        drawn.push(card);
    }
    debug!("dealer stops at {}", hand.value().total);
    Ok(drawn)
}
