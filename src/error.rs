use thiserror::Error;

use crate::round::{Phase, PlayerAction};

/// Failures surfaced by the game core.
///
/// `InvalidBet` and `ActionUnavailable` are recoverable: the session re-requests
/// input. `ShoeExhausted` indicates an internal inconsistency (a single round can
/// never legitimately draw through a full shoe) and aborts the session.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("bet {bet} is outside the valid range [1, {chips}]")]
    InvalidBet { bet: u64, chips: u64 },

    #[error("action {0:?} is not available")]
    ActionUnavailable(PlayerAction),

    #[error("shoe exhausted mid-round (internal error)")]
    ShoeExhausted,

    #[error("operation not valid in phase {0:?}")]
    OutOfTurn(Phase),
}
