//! Engine error types.
//!
//! Rule logic propagates `EngineError` with `?`. The `GameFinished`
//! variant is the table-lifecycle unwind signal: it must travel all the way
//! out of the dispatcher and is never converted into a "handled" result.
//!
//! Decision timeouts are not errors. An unresponsive agent yields an empty
//! reply and the actor simply passes.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::PlayerId;

/// A rejected play. Raised before any state mutation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("card {0} is not known to the catalog")]
    UnknownCard(CardId),
    #[error("card {card} is not held by {player}")]
    CardNotOwned { card: CardId, player: PlayerId },
    #[error("{0} is not seated at this table")]
    UnknownPlayer(PlayerId),
    #[error("{0} cannot be targeted")]
    IllegalTarget(PlayerId),
    #[error("target list is not feasible for this card")]
    InfeasibleTargets,
    #[error("card cannot be used")]
    Unavailable,
}

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The table was abandoned or shut down. Unwinds every pending trigger.
    #[error("game finished")]
    GameFinished,

    #[error("rule violation: {0}")]
    RuleViolation(#[from] RuleViolation),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Check whether this is the table-lifecycle unwind signal.
    #[must_use]
    pub fn is_game_finished(&self) -> bool {
        matches!(self, EngineError::GameFinished)
    }
}

/// Result type used throughout the rule engine.
pub type EngineResult<T> = Result<T, EngineError>;
