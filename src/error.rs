//! Crate-wide error taxonomy.
//!
//! One enum covers every failure kind named in the error-handling design:
//! malformed input, preflop "insufficient data", simulator exhaustion, and
//! a catch-all internal variant. Nothing in this crate throws or unwinds —
//! every fallible call returns `Result<_, EngineError>`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// Malformed card string, duplicate card, variant/card-count mismatch,
    /// bad enum value, or negative chip amount. Never retried by a caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A card string was the wrong length or used an unknown rank/suit
    /// character.
    #[error("could not parse card {0:?}")]
    ParseError(String),

    /// Wrong hole-card count for the declared Omaha variant.
    #[error("variant mismatch: expected {expected} hole cards, got {actual}")]
    VariantMismatch { expected: usize, actual: usize },

    /// A 5-card (or Omaha hole+board) evaluation was attempted with
    /// duplicate cards across hole and board.
    #[error("duplicate card in hand: {0}")]
    DuplicateCard(String),

    /// The board has fewer than 3 cards; the evaluator cannot yet form a
    /// 5-card hand. Callers route preflop requests through a different
    /// path instead of treating this as a hard failure.
    #[error("insufficient board data for evaluation (preflop)")]
    InsufficientData,

    /// A flop-texture classification was requested with a board whose
    /// length is not exactly 3.
    #[error("flop texture requires exactly 3 board cards, got {0}")]
    InvalidBoardLength(usize),

    /// The deck does not have enough unseen cards to satisfy a deal.
    #[error("out of cards: requested {requested}, available {available}")]
    OutOfCards { requested: usize, available: usize },

    /// A Monte Carlo configuration requires more cards than the deck can
    /// supply (`playerCount * holeCount + 5 > 52`). Fatal to the run.
    #[error("deck exhausted: configuration needs {needed} cards, deck has {available}")]
    DeckExhausted { needed: usize, available: usize },

    /// Simulation configuration is invalid (e.g. `iterations <= 0`).
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    /// A starting-hand query string failed to parse.
    #[error("invalid query {query:?}: {reason}")]
    InvalidQuery { query: String, reason: String },

    /// An equity-cache entry referenced a matrix version that no longer
    /// exists. Treated as a miss by the caller, never surfaced further.
    #[error("cache entry references a stale matrix version")]
    CacheInconsistency,

    /// Any unexpected internal state. Never swallowed silently.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
