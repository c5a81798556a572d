use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::chips::Chips;
use crate::error::GameError;
use crate::hand::HandValue;
use crate::round::{Phase, PlayerAction, Round, RoundOutcome};
use crate::shoe::Shoe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Dealer,
}

/// Answer to a bet request: a wager, or quitting the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetDecision {
    Bet(u64),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEnd {
    OutOfChips,
    Quit,
}

/// Render-only notifications emitted while a round runs. The front end
/// decides how (and whether) to draw them; nothing here mutates game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Opening deal. Only the dealer upcard is exposed; the hole card stays
    /// hidden until `DealerReveal`.
    InitialDeal {
        player: Vec<Card>,
        player_value: HandValue,
        dealer_upcard: Card,
    },
    HandUpdated {
        seat: Seat,
        cards: Vec<Card>,
        value: HandValue,
    },
    Natural {
        seat: Seat,
    },
    Bust {
        seat: Seat,
        total: u8,
    },
    DealerReveal {
        cards: Vec<Card>,
        value: HandValue,
    },
    RoundResult {
        outcome: RoundOutcome,
        delta: i64,
        chips: u64,
    },
    SessionEnded {
        reason: SessionEnd,
    },
}

/// The presentation layer. The core calls in for input at its three
/// suspension points and pushes events out for rendering; implementations
/// must never touch hands or the balance directly.
///
/// Invalid input is the front end's problem to re-prompt for; the core
/// validates defensively anyway and simply re-requests.
pub trait Ui {
    fn request_bet(&mut self, chips: u64) -> BetDecision;
    fn request_action(&mut self, can_double: bool) -> PlayerAction;
    fn request_continue(&mut self) -> bool;
    fn event(&mut self, event: &GameEvent);
}

/// Outcome of driving a single round: played to settlement, or quit at the
/// bet prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundFlow {
    Played,
    Quit,
}

/// Repeats rounds until the player quits or runs out of chips. Sole owner of
/// the chip balance; each round gets a fresh shuffled shoe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    chips: Chips,
}

impl Session {
    pub fn new(buy_in: u64) -> Self {
        Self {
            chips: Chips::new(buy_in),
        }
    }

    pub fn chips(&self) -> u64 {
        self.chips.amount()
    }

    /// Drives the session to one of its terminal conditions. Only a fatal
    /// internal error (`ShoeExhausted`) escapes as `Err`.
    pub fn run(&mut self, rng: &mut impl Rng, ui: &mut impl Ui) -> Result<SessionEnd, GameError> {
        loop {
            if self.chips.is_zero() {
                ui.event(&GameEvent::SessionEnded {
                    reason: SessionEnd::OutOfChips,
                });
                return Ok(SessionEnd::OutOfChips);
            }

            let mut shoe = Shoe::shuffled(rng);
            if self.play_round(&mut shoe, ui)? == RoundFlow::Quit {
                ui.event(&GameEvent::SessionEnded {
                    reason: SessionEnd::Quit,
                });
                return Ok(SessionEnd::Quit);
            }

            if !self.chips.is_zero() && !ui.request_continue() {
                ui.event(&GameEvent::SessionEnded {
                    reason: SessionEnd::Quit,
                });
                return Ok(SessionEnd::Quit);
            }
        }
    }

    /// Plays a single round against the given shoe. Public mainly so front
    /// ends and tests can drive one round with a shoe of their choosing.
    pub fn play_round(&mut self, shoe: &mut Shoe, ui: &mut impl Ui) -> Result<RoundFlow, GameError> {
        let mut round = Round::new();

        loop {
            match ui.request_bet(self.chips.amount()) {
                BetDecision::Quit => return Ok(RoundFlow::Quit),
                BetDecision::Bet(bet) => match round.place_bet(&mut self.chips, bet) {
                    Ok(()) => break,
                    Err(err @ GameError::InvalidBet { .. }) => {
                        warn!("rejected bet: {err}");
                        continue;
                    }
                    Err(err) => return Err(err),
                },
            }
        }

        let dealer_upcard = round.deal_initial(shoe)?;
        ui.event(&GameEvent::InitialDeal {
            player: round.player().cards().to_vec(),
            player_value: round.player().value(),
            dealer_upcard,
        });

        if round.phase() == Phase::Settled {
            // A natural short-circuits the round.
            if round.player().is_natural() {
                ui.event(&GameEvent::Natural { seat: Seat::Player });
            }
            if round.dealer().is_natural() {
                ui.event(&GameEvent::Natural { seat: Seat::Dealer });
            }
            ui.event(&GameEvent::DealerReveal {
                cards: round.dealer().cards().to_vec(),
                value: round.dealer().value(),
            });
            return self.finish(round, ui);
        }

        while round.phase() == Phase::PlayerTurn {
            let can_double = round.can_double(&self.chips);
            let action = ui.request_action(can_double);
            debug!("player action: {action:?}");

            let result = match action {
                PlayerAction::Hit => round.hit(shoe),
                PlayerAction::Double => round.double_down(&mut self.chips, shoe),
                PlayerAction::Stand => {
                    round.stand()?;
                    continue;
                }
            };

            match result {
                Ok(value) => {
                    ui.event(&GameEvent::HandUpdated {
                        seat: Seat::Player,
                        cards: round.player().cards().to_vec(),
                        value,
                    });
                    if value.total > 21 {
                        ui.event(&GameEvent::Bust {
                            seat: Seat::Player,
                            total: value.total,
                        });
                    }
                }
                Err(err @ GameError::ActionUnavailable(_)) => {
                    warn!("rejected action: {err}");
                }
                Err(err) => return Err(err),
            }
        }

        if round.phase() == Phase::DealerTurn {
            ui.event(&GameEvent::DealerReveal {
                cards: round.dealer().cards().to_vec(),
                value: round.dealer().value(),
            });
            let drawn = round.play_dealer(shoe)?;
            let value = round.dealer().value();
            if !drawn.is_empty() {
                ui.event(&GameEvent::HandUpdated {
                    seat: Seat::Dealer,
                    cards: round.dealer().cards().to_vec(),
                    value,
                });
            }
            if value.total > 21 {
                ui.event(&GameEvent::Bust {
                    seat: Seat::Dealer,
                    total: value.total,
                });
            }
        }

        self.finish(round, ui)
    }

    fn finish(&mut self, round: Round, ui: &mut impl Ui) -> Result<RoundFlow, GameError> {
        let settlement = round.settle(&mut self.chips)?;
        ui.event(&GameEvent::RoundResult {
            outcome: settlement.outcome,
            delta: settlement.delta,
            chips: self.chips.amount(),
        });
        Ok(RoundFlow::Played)
    }
}
