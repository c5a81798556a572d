use serde::{Deserialize, Serialize};

/// The player's chip balance. Newtype over u64 so bets and balances do not
/// mix with ordinary numbers; every deduction is guarded, so the balance
/// never underflows.
///
/// Accounting is escrow-style: a bet leaves the balance when it is placed
/// (and again when doubling), and settlement pays back the refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Chips(u64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn new(amount: u64) -> Self {
        Chips(amount)
    }

    pub fn amount(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Moves `amount` out of the balance. Returns false (and leaves the
    /// balance untouched) when it cannot be covered.
    pub fn try_stake(&mut self, amount: u64) -> bool {
        if amount > self.0 {
            return false;
        }
        self.0 -= amount;
        true
    }

    pub fn credit(&mut self, amount: u64) {
        self.0 = self.0.saturating_add(amount);
    }
}
