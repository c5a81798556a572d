mod card;
mod chips;
pub mod dealer;
mod error;
mod hand;
mod round;
mod session;
mod shoe;

pub use card::{Card, Rank, Suit};
pub use chips::Chips;
pub use error::GameError;
pub use hand::{hand_value, is_busted, is_natural, Hand, HandValue};
pub use round::{blackjack_payout, Phase, PlayerAction, Round, RoundOutcome, Settlement};
pub use session::{BetDecision, GameEvent, RoundFlow, Seat, Session, SessionEnd, Ui};
pub use shoe::Shoe;
