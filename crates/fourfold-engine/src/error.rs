//! Error types for the game state machine.

use fourfold_core::Phase;
use fourfold_delta::{DecodeError, EncodeError};
use thiserror::Error;

/// Coarse outcome category reported back to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    WrongPhase,
    WrongPlayer,
    IllegalMove,
    Malformed,
    InvalidRoster,
    UnknownReplica,
}

/// Errors returned by engine operations. None of these leave the engine in
/// a partially updated state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{operation} is not allowed in phase {actual}")]
    WrongPhase {
        operation: &'static str,
        actual: Phase,
    },

    #[error("Wrong player: turn belongs to player {expected}, mover resolved to {actual}")]
    WrongPlayer { expected: u8, actual: u8 },

    #[error("Illegal move in column {column}")]
    IllegalMove { column: u8 },

    #[error("Malformed delta: {0}")]
    Malformed(#[from] DecodeError),

    #[error("Delta writes outside the board at ({column}, {row})")]
    CellOutOfBounds { column: u8, row: u8 },

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Delta carries an invalid roster: {0}")]
    RejectedRoster(String),

    #[error("Delta turn pointer {current_player} is outside 1..={players}")]
    TurnOutOfRange { current_player: u8, players: usize },

    #[error("No replica at index {index} (cluster has {replicas})")]
    UnknownReplica { index: usize, replicas: usize },

    #[error("Delta encoding failed: {0}")]
    Encode(#[from] EncodeError),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::WrongPhase { .. } => ErrorKind::WrongPhase,
            EngineError::WrongPlayer { .. } => ErrorKind::WrongPlayer,
            EngineError::IllegalMove { .. } => ErrorKind::IllegalMove,
            EngineError::Malformed(_)
            | EngineError::CellOutOfBounds { .. }
            | EngineError::RejectedRoster(_)
            | EngineError::TurnOutOfRange { .. } => ErrorKind::Malformed,
            EngineError::InvalidRoster(_) | EngineError::Encode(_) => ErrorKind::InvalidRoster,
            EngineError::UnknownReplica { .. } => ErrorKind::UnknownReplica,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
