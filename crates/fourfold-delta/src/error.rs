//! Error types for the delta codec.

use fourfold_core::Phase;
use thiserror::Error;

/// Failures while decoding a delta from bytes. Any of these means the
/// buffer is malformed; nothing was read past its end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Empty delta buffer")]
    Empty,

    #[error("Unknown phase byte: {0}")]
    UnknownPhase(u8),

    #[error("No delta variant is tagged with phase {0}")]
    UnknownVariant(Phase),

    #[error("{variant} delta cannot carry phase {phase}")]
    UnexpectedPhase { variant: &'static str, phase: Phase },

    #[error("{variant} delta truncated: need {needed} bytes, got {actual}")]
    Truncated {
        variant: &'static str,
        needed: usize,
        actual: usize,
    },

    #[error("Action delta declares cell width {0}, expected 3")]
    BadCellWidth(u8),

    #[error("{variant} delta has {extra} trailing bytes")]
    TrailingBytes { variant: &'static str, extra: usize },
}

/// Failures while encoding a delta. Every header count is a single byte.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Too many players: {0} (max 255)")]
    TooManyPlayers(usize),

    #[error("Player identity of {0} bytes exceeds 255")]
    IdentityTooLong(usize),

    #[error("Player identities differ in length: expected {expected}, found {found}")]
    MixedIdentityLength { expected: usize, found: usize },

    #[error("Too many changed cells: {0} (max 255)")]
    TooManyCells(usize),
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
