use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::chips::Chips;
use crate::dealer;
use crate::error::GameError;
use crate::hand::{Hand, HandValue};
use crate::shoe::Shoe;

/// Where a round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingBet,
    Dealing,
    PlayerTurn,
    DealerTurn,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Hit,
    Stand,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Player natural, paid 3:2.
    Blackjack,
    /// Dealer natural against a non-natural player hand.
    DealerBlackjack,
    /// Player went over 21.
    Bust,
    /// Dealer went over 21.
    DealerBust,
    Win,
    Loss,
    Push,
}

/// Result of settling a round. `refund` is what the escrow pays back into
/// the balance; `delta` is the net chip change relative to the start of the
/// round (refund minus everything staked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcome: RoundOutcome,
    pub refund: u64,
    pub delta: i64,
}

/// Blackjack pays 3:2, rounded down.
pub fn blackjack_payout(bet: u64) -> u64 {
    (bet * 3) / 2
}

/// One betting round: bet capture, initial deal, player decisions, dealer
/// play, settlement. Owns both hands and the escrowed bet; the chip balance
/// stays with the session and is passed in where it is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    player: Hand,
    dealer: Hand,
    bet: u64,
    doubled: bool,
    phase: Phase,
}

impl Round {
    pub fn new() -> Self {
        Self {
            player: Hand::new(),
            dealer: Hand::new(),
            bet: 0,
            doubled: false,
            phase: Phase::AwaitingBet,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn doubled(&self) -> bool {
        self.doubled
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    fn expect_phase(&self, phase: Phase) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::OutOfTurn(self.phase))
        }
    }

    /// Escrows the bet. Rejects anything outside [1, balance] without
    /// touching the balance.
    pub fn place_bet(&mut self, chips: &mut Chips, bet: u64) -> Result<(), GameError> {
        self.expect_phase(Phase::AwaitingBet)?;
        if bet == 0 || !chips.try_stake(bet) {
            return Err(GameError::InvalidBet {
                bet,
                chips: chips.amount(),
            });
        }
        self.bet = bet;
        self.phase = Phase::Dealing;
        debug!("bet {bet} placed, {} chips remain", chips.amount());
        Ok(())
    }

    /// Two cards to the player, then two to the dealer (the second dealer
    /// card is the hole card, hidden only for display). Returns the dealer
    /// upcard. A natural on either side settles the round immediately.
    pub fn deal_initial(&mut self, shoe: &mut Shoe) -> Result<Card, GameError> {
        self.expect_phase(Phase::Dealing)?;
        for _ in 0..2 {
            self.player.push(shoe.deal()?);
        }
        let upcard = shoe.deal()?;
        self.dealer.push(upcard);
        self.dealer.push(shoe.deal()?);

        self.phase = if self.player.is_natural() || self.dealer.is_natural() {
            Phase::Settled
        } else {
            Phase::PlayerTurn
        };
        debug!(
            "dealt player {} vs dealer upcard {upcard}, phase {:?}",
            self.player.value().total,
            self.phase
        );
        Ok(upcard)
    }

    /// Whether doubling down is currently on offer: the remaining balance
    /// must cover a second bet. Re-checked at every player decision.
    pub fn can_double(&self, chips: &Chips) -> bool {
        self.phase == Phase::PlayerTurn && !self.doubled && chips.amount() >= self.bet
    }

    /// Draws one card. Busting settles the round on the spot; the dealer
    /// never acts.
    pub fn hit(&mut self, shoe: &mut Shoe) -> Result<HandValue, GameError> {
        self.expect_phase(Phase::PlayerTurn)?;
        self.player.push(shoe.deal()?);
        let value = self.player.value();
        if value.total > 21 {
            self.phase = Phase::Settled;
        }
        Ok(value)
    }

    /// Escrows a second bet, doubles the recorded bet, and draws exactly one
    /// card. A non-bust hand stands automatically.
    pub fn double_down(&mut self, chips: &mut Chips, shoe: &mut Shoe) -> Result<HandValue, GameError> {
        self.expect_phase(Phase::PlayerTurn)?;
        if self.doubled || !chips.try_stake(self.bet) {
            return Err(GameError::ActionUnavailable(PlayerAction::Double));
        }
        self.bet *= 2;
        self.doubled = true;
        self.player.push(shoe.deal()?);
        let value = self.player.value();
        self.phase = if value.total > 21 {
            Phase::Settled
        } else {
            Phase::DealerTurn
        };
        Ok(value)
    }

    pub fn stand(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::PlayerTurn)?;
        self.phase = Phase::DealerTurn;
        Ok(())
    }

    /// Runs the dealer policy to completion and returns the cards drawn.
    pub fn play_dealer(&mut self, shoe: &mut Shoe) -> Result<Vec<Card>, GameError> {
        self.expect_phase(Phase::DealerTurn)?;
        let drawn = dealer::play(shoe, &mut self.dealer)?;
        self.phase = Phase::Settled;
        Ok(drawn)
    }

    /// Resolves the round and pays the refund back into the balance.
    /// Consumes the round so a settlement can never be applied twice.
    pub fn settle(self, chips: &mut Chips) -> Result<Settlement, GameError> {
        self.expect_phase(Phase::Settled)?;
        let (outcome, refund) = self.resolve();
        chips.credit(refund);
        let delta = refund as i64 - self.bet as i64;
        info!(
            "round settled: {outcome:?}, delta {delta:+}, balance {}",
            chips.amount()
        );
        Ok(Settlement {
            outcome,
            refund,
            delta,
        })
    }

    /// Outcome and escrow refund, derived purely from the two hands and the
    /// bet. Naturals first, then busts, then the total comparison.
    fn resolve(&self) -> (RoundOutcome, u64) {
        let bet = self.bet;
        match (self.player.is_natural(), self.dealer.is_natural()) {
            (true, true) => return (RoundOutcome::Push, bet),
            (true, false) => return (RoundOutcome::Blackjack, bet + blackjack_payout(bet)),
            (false, true) => return (RoundOutcome::DealerBlackjack, 0),
            (false, false) => {}
        }

        let player = self.player.value().total;
        let dealer = self.dealer.value().total;
        if player > 21 {
            (RoundOutcome::Bust, 0)
        } else if dealer > 21 {
            (RoundOutcome::DealerBust, 2 * bet)
        } else if player > dealer {
            (RoundOutcome::Win, 2 * bet)
        } else if dealer > player {
            (RoundOutcome::Loss, 0)
        } else {
            (RoundOutcome::Push, bet)
        }
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
