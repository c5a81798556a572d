use super::*;
use crate::card::{Rank, Suit};

fn card(rank: Rank) -> Card {
    Card::new(rank, Suit::Spades)
}

/// Shoe dealing player card 1, player card 2, dealer upcard, dealer hole,
/// then the listed extras.
fn shoe_of(ranks: &[Rank]) -> Shoe {
    let suits = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
    Shoe::stacked(
        ranks
            .iter()
            .enumerate()
            .map(|(i, &rank)| Card::new(rank, suits[i % 4]))
            .collect(),
    )
}

fn started(chips: &mut Chips, bet: u64, ranks: &[Rank]) -> (Round, Shoe) {
    let mut round = Round::new();
    let mut shoe = shoe_of(ranks);
    round.place_bet(chips, bet).unwrap();
    round.deal_initial(&mut shoe).unwrap();
    (round, shoe)
}

#[test]
fn test_bet_of_zero_is_rejected() {
    let mut chips = Chips::new(100);
    let mut round = Round::new();
    assert_eq!(
        round.place_bet(&mut chips, 0),
        Err(GameError::InvalidBet { bet: 0, chips: 100 })
    );
    assert_eq!(chips.amount(), 100);
    assert_eq!(round.phase(), Phase::AwaitingBet);
}

#[test]
fn test_bet_above_balance_is_rejected() {
    let mut chips = Chips::new(50);
    let mut round = Round::new();
    assert_eq!(
        round.place_bet(&mut chips, 51),
        Err(GameError::InvalidBet { bet: 51, chips: 50 })
    );
    assert_eq!(chips.amount(), 50);
}

#[test]
fn test_bet_is_escrowed() {
    let mut chips = Chips::new(100);
    let mut round = Round::new();
    round.place_bet(&mut chips, 10).unwrap();
    assert_eq!(chips.amount(), 90);
    assert_eq!(round.bet(), 10);
    assert_eq!(round.phase(), Phase::Dealing);
}

#[test]
fn test_deal_before_bet_is_out_of_turn() {
    let mut round = Round::new();
    let mut shoe = shoe_of(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
    assert_eq!(
        round.deal_initial(&mut shoe),
        Err(GameError::OutOfTurn(Phase::AwaitingBet))
    );
}

#[test]
fn test_hit_before_deal_is_out_of_turn() {
    let mut chips = Chips::new(100);
    let mut round = Round::new();
    round.place_bet(&mut chips, 10).unwrap();
    let mut shoe = shoe_of(&[Rank::Two]);
    assert_eq!(round.hit(&mut shoe), Err(GameError::OutOfTurn(Phase::Dealing)));
}

#[test]
fn test_player_natural_pays_three_to_two() {
    let mut chips = Chips::new(100);
    let (round, _) = started(&mut chips, 10, &[Rank::Ace, Rank::King, Rank::Nine, Rank::Seven]);
    assert_eq!(round.phase(), Phase::Settled);
    assert!(round.player().is_natural());

    let settlement = round.settle(&mut chips).unwrap();
    assert_eq!(settlement.outcome, RoundOutcome::Blackjack);
    assert_eq!(settlement.delta, 15);
    // 90 in escrowed balance + bet back + floor(1.5 * 10)
    assert_eq!(chips.amount(), 115);
}

#[test]
fn test_dealer_natural_loses_the_bet() {
    let mut chips = Chips::new(100);
    let (round, _) = started(&mut chips, 10, &[Rank::Nine, Rank::Seven, Rank::Ace, Rank::King]);
    assert_eq!(round.phase(), Phase::Settled);

    let settlement = round.settle(&mut chips).unwrap();
    assert_eq!(settlement.outcome, RoundOutcome::DealerBlackjack);
    assert_eq!(settlement.delta, -10);
    assert_eq!(chips.amount(), 90);
}

#[test]
fn test_both_naturals_push() {
    let mut chips = Chips::new(100);
    let (round, _) = started(&mut chips, 10, &[Rank::Ace, Rank::Queen, Rank::King, Rank::Ace]);
    let settlement = round.settle(&mut chips).unwrap();
    assert_eq!(settlement.outcome, RoundOutcome::Push);
    assert_eq!(settlement.delta, 0);
    assert_eq!(chips.amount(), 100);
}

#[test]
fn test_hit_to_bust_settles_immediately() {
    let mut chips = Chips::new(100);
    let (mut round, mut shoe) = started(
        &mut chips,
        10,
        &[Rank::King, Rank::Five, Rank::Nine, Rank::Seven, Rank::King],
    );
    assert_eq!(round.phase(), Phase::PlayerTurn);

    let value = round.hit(&mut shoe).unwrap();
    assert_eq!(value.total, 25);
    assert_eq!(round.phase(), Phase::Settled);

    let settlement = round.settle(&mut chips).unwrap();
    assert_eq!(settlement.outcome, RoundOutcome::Bust);
    assert_eq!(chips.amount(), 90);
}

#[test]
fn test_stand_hands_over_to_dealer() {
    let mut chips = Chips::new(100);
    let (mut round, mut shoe) = started(
        &mut chips,
        10,
        &[Rank::King, Rank::Nine, Rank::King, Rank::Six, Rank::Queen],
    );
    round.stand().unwrap();
    assert_eq!(round.phase(), Phase::DealerTurn);

    // Dealer has hard 16 and must draw: the queen busts it.
    let drawn = round.play_dealer(&mut shoe).unwrap();
    assert_eq!(drawn.len(), 1);
    assert!(round.dealer().is_busted());

    let settlement = round.settle(&mut chips).unwrap();
    assert_eq!(settlement.outcome, RoundOutcome::DealerBust);
    assert_eq!(chips.amount(), 110);
}

#[test]
fn test_dealer_stands_on_soft_17() {
    let mut chips = Chips::new(100);
    let (mut round, mut shoe) = started(
        &mut chips,
        10,
        &[Rank::King, Rank::Nine, Rank::Ace, Rank::Six, Rank::Queen],
    );
    round.stand().unwrap();
    let drawn = round.play_dealer(&mut shoe).unwrap();
    assert!(drawn.is_empty());
    assert_eq!(round.dealer().value().total, 17);

    // Player 19 beats dealer soft 17.
    let settlement = round.settle(&mut chips).unwrap();
    assert_eq!(settlement.outcome, RoundOutcome::Win);
    assert_eq!(chips.amount(), 110);
}

#[test]
fn test_double_down_escrows_second_bet_and_draws_once() {
    let mut chips = Chips::new(100);
    let (mut round, mut shoe) = started(
        &mut chips,
        10,
        &[Rank::Five, Rank::Six, Rank::Nine, Rank::Eight, Rank::Nine],
    );
    assert!(round.can_double(&chips));

    let value = round.double_down(&mut chips, &mut shoe).unwrap();
    assert_eq!(chips.amount(), 80);
    assert_eq!(round.bet(), 20);
    assert_eq!(value.total, 20);
    // One card, then forced stand.
    assert_eq!(round.phase(), Phase::DealerTurn);

    round.play_dealer(&mut shoe).unwrap();
    // Dealer 9 + 8 = 17 stands; player 20 wins the doubled bet.
    let settlement = round.settle(&mut chips).unwrap();
    assert_eq!(settlement.outcome, RoundOutcome::Win);
    assert_eq!(settlement.delta, 20);
    assert_eq!(chips.amount(), 120);
}

#[test]
fn test_double_down_bust_costs_exactly_the_doubled_bet() {
    let mut chips = Chips::new(100);
    let (mut round, mut shoe) = started(
        &mut chips,
        10,
        &[Rank::Nine, Rank::Six, Rank::Nine, Rank::Eight, Rank::King],
    );
    let value = round.double_down(&mut chips, &mut shoe).unwrap();
    assert!(value.total > 21);
    assert_eq!(round.phase(), Phase::Settled);
    assert_eq!(chips.amount(), 80);

    // Both stakes were taken at bet/double time; the bust costs nothing more.
    let settlement = round.settle(&mut chips).unwrap();
    assert_eq!(settlement.outcome, RoundOutcome::Bust);
    assert_eq!(settlement.delta, -20);
    assert_eq!(chips.amount(), 80);
}

#[test]
fn test_double_unavailable_when_unaffordable() {
    let mut chips = Chips::new(15);
    let (mut round, mut shoe) = started(
        &mut chips,
        10,
        &[Rank::Five, Rank::Six, Rank::Nine, Rank::Eight, Rank::Nine],
    );
    // 5 chips remain after escrow, not enough to match the 10 bet.
    assert!(!round.can_double(&chips));
    assert_eq!(
        round.double_down(&mut chips, &mut shoe),
        Err(GameError::ActionUnavailable(PlayerAction::Double))
    );
    assert_eq!(chips.amount(), 5);
    assert_eq!(round.phase(), Phase::PlayerTurn);
}

#[test]
fn test_push_returns_the_bet() {
    let mut chips = Chips::new(100);
    let (mut round, mut shoe) = started(
        &mut chips,
        10,
        &[Rank::King, Rank::Eight, Rank::Nine, Rank::Nine, Rank::Two],
    );
    round.stand().unwrap();
    round.play_dealer(&mut shoe).unwrap();
    let settlement = round.settle(&mut chips).unwrap();
    assert_eq!(settlement.outcome, RoundOutcome::Push);
    assert_eq!(settlement.delta, 0);
    assert_eq!(chips.amount(), 100);
}

#[test]
fn test_loss_on_lower_total() {
    let mut chips = Chips::new(100);
    let (mut round, mut shoe) = started(
        &mut chips,
        10,
        &[Rank::King, Rank::Seven, Rank::Nine, Rank::Nine, Rank::Two],
    );
    round.stand().unwrap();
    round.play_dealer(&mut shoe).unwrap();
    let settlement = round.settle(&mut chips).unwrap();
    assert_eq!(settlement.outcome, RoundOutcome::Loss);
    assert_eq!(chips.amount(), 90);
}

#[test]
fn test_settle_before_resolution_is_out_of_turn() {
    let mut chips = Chips::new(100);
    let (round, _) = started(
        &mut chips,
        10,
        &[Rank::King, Rank::Seven, Rank::Nine, Rank::Nine],
    );
    assert_eq!(round.phase(), Phase::PlayerTurn);
    assert_eq!(
        round.settle(&mut chips),
        Err(GameError::OutOfTurn(Phase::PlayerTurn))
    );
}

#[test]
fn test_exhausted_shoe_aborts_the_deal() {
    let mut chips = Chips::new(100);
    let mut round = Round::new();
    let mut shoe = shoe_of(&[Rank::Two, Rank::Three]);
    round.place_bet(&mut chips, 10).unwrap();
    assert_eq!(round.deal_initial(&mut shoe), Err(GameError::ShoeExhausted));
}
