//! Read-only full-state view of a game instance
//!
//! The board is flattened column-major (`index = column * ROWS + row`), so
//! every cell has its own slot. The byte form is `[phase][turn][cells...]`.

use fourfold_core::{Board, Phase, COLUMNS, ROWS};
use fourfold_delta::{DecodeError, DecodeResult};
use serde::{Deserialize, Serialize};

const VARIANT: &str = "Snapshot";

/// Byte length of an encoded snapshot
pub const SNAPSHOT_LEN: usize = 2 + COLUMNS * ROWS;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub current_player: u8,
    pub board: Vec<u8>,
}

impl Snapshot {
    pub fn new(phase: Phase, current_player: u8, board: &Board) -> Self {
        Self {
            phase,
            current_player,
            board: board.flatten(),
        }
    }

    /// Cell value at `(column, row)`
    pub fn cell(&self, column: usize, row: usize) -> Option<u8> {
        if column >= COLUMNS || row >= ROWS {
            return None;
        }
        self.board.get(column * ROWS + row).copied()
    }

    /// Rebuild the board this snapshot was taken from
    pub fn to_board(&self) -> Option<Board> {
        Board::from_flat(&self.board)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SNAPSHOT_LEN);
        out.push(self.phase.as_byte());
        out.push(self.current_player);
        out.extend_from_slice(&self.board);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> DecodeResult<Self> {
        if bytes.len() < SNAPSHOT_LEN {
            return Err(DecodeError::Truncated {
                variant: VARIANT,
                needed: SNAPSHOT_LEN,
                actual: bytes.len(),
            });
        }
        if bytes.len() > SNAPSHOT_LEN {
            return Err(DecodeError::TrailingBytes {
                variant: VARIANT,
                extra: bytes.len() - SNAPSHOT_LEN,
            });
        }
        let phase = Phase::try_from(bytes[0]).map_err(DecodeError::UnknownPhase)?;
        Ok(Self {
            phase,
            current_player: bytes[1],
            board: bytes[2..].to_vec(),
        })
    }
}
