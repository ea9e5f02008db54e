//! Wire layout of the three delta variants
//!
//! Every variant starts with the phase byte. The remaining layout is:
//!
//! ```text
//! Init:    [phase][starting_player][player_count P][id_len L][P * L identity bytes]
//! Running: [phase]
//! Action:  [phase][current_player][change_count C]([cell_width = 3][C * (column, row, stone)])
//! ```
//!
//! The Action cell width byte and its tail are present only when `C > 0`.
//! Decoding checks every declared length against the buffer before it
//! reads the tail.

use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use fourfold_core::{CellChange, Phase};
use serde::{Deserialize, Serialize};

/// Header bytes of an Init delta
pub const INIT_HEADER_LEN: usize = 4;

/// Header bytes of an Action delta without changes
pub const ACTION_HEADER_LEN: usize = 3;

/// Bytes per encoded (column, row, stone) triple
pub const CELL_WIDTH: u8 = 3;

/// Seeds roster, turn pointer and phase on every replica.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitDelta {
    pub phase: Phase,
    pub starting_player: u8,
    pub players: Vec<Vec<u8>>,
}

/// Moves a game from `Initialized` to `Running`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningDelta {
    pub phase: Phase,
}

/// Result of one executed move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDelta {
    pub phase: Phase,
    pub current_player: u8,
    pub changed_cells: Vec<CellChange>,
}

/// A decoded delta of any variant
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delta {
    Init(InitDelta),
    Running(RunningDelta),
    Action(ActionDelta),
}

fn parse_phase(byte: u8) -> DecodeResult<Phase> {
    Phase::try_from(byte).map_err(DecodeError::UnknownPhase)
}

fn require_len(variant: &'static str, buf: &[u8], needed: usize) -> DecodeResult<()> {
    if buf.len() < needed {
        return Err(DecodeError::Truncated {
            variant,
            needed,
            actual: buf.len(),
        });
    }
    Ok(())
}

fn reject_trailing(variant: &'static str, buf: &[u8], expected: usize) -> DecodeResult<()> {
    if buf.len() > expected {
        return Err(DecodeError::TrailingBytes {
            variant,
            extra: buf.len() - expected,
        });
    }
    Ok(())
}

impl InitDelta {
    const VARIANT: &'static str = "Init";

    pub fn new(starting_player: u8, players: Vec<Vec<u8>>) -> Self {
        Self {
            phase: Phase::Initialized,
            starting_player,
            players,
        }
    }

    /// Shared identity length; zero for an empty roster.
    pub fn identity_len(&self) -> usize {
        self.players.first().map(Vec::len).unwrap_or(0)
    }

    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        let count = self.players.len();
        let id_len = self.identity_len();

        if count > u8::MAX as usize {
            return Err(EncodeError::TooManyPlayers(count));
        }
        if id_len > u8::MAX as usize {
            return Err(EncodeError::IdentityTooLong(id_len));
        }
        if let Some(odd) = self.players.iter().find(|p| p.len() != id_len) {
            return Err(EncodeError::MixedIdentityLength {
                expected: id_len,
                found: odd.len(),
            });
        }

        let mut out = Vec::with_capacity(INIT_HEADER_LEN + count * id_len);
        out.push(self.phase.as_byte());
        out.push(self.starting_player);
        out.push(count as u8);
        out.push(id_len as u8);
        for player in &self.players {
            out.extend_from_slice(player);
        }
        Ok(out)
    }

    pub fn decode(buf: &[u8]) -> DecodeResult<Self> {
        require_len(Self::VARIANT, buf, INIT_HEADER_LEN)?;

        let phase = parse_phase(buf[0])?;
        if phase != Phase::Initialized {
            return Err(DecodeError::UnexpectedPhase {
                variant: Self::VARIANT,
                phase,
            });
        }

        let count = buf[2] as usize;
        let id_len = buf[3] as usize;
        let total = INIT_HEADER_LEN + count * id_len;
        require_len(Self::VARIANT, buf, total)?;
        reject_trailing(Self::VARIANT, buf, total)?;

        let players = if id_len == 0 {
            vec![Vec::new(); count]
        } else {
            buf[INIT_HEADER_LEN..total]
                .chunks_exact(id_len)
                .map(<[u8]>::to_vec)
                .collect()
        };

        Ok(Self {
            phase,
            starting_player: buf[1],
            players,
        })
    }
}

impl RunningDelta {
    const VARIANT: &'static str = "Running";

    pub fn new() -> Self {
        Self {
            phase: Phase::Running,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        vec![self.phase.as_byte()]
    }

    pub fn decode(buf: &[u8]) -> DecodeResult<Self> {
        require_len(Self::VARIANT, buf, 1)?;
        let phase = parse_phase(buf[0])?;
        if phase != Phase::Running {
            return Err(DecodeError::UnexpectedPhase {
                variant: Self::VARIANT,
                phase,
            });
        }
        reject_trailing(Self::VARIANT, buf, 1)?;
        Ok(Self { phase })
    }
}

impl Default for RunningDelta {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionDelta {
    const VARIANT: &'static str = "Action";

    pub fn new(phase: Phase, current_player: u8, changed_cells: Vec<CellChange>) -> Self {
        Self {
            phase,
            current_player,
            changed_cells,
        }
    }

    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        let count = self.changed_cells.len();
        if count > u8::MAX as usize {
            return Err(EncodeError::TooManyCells(count));
        }

        let mut out = Vec::with_capacity(ACTION_HEADER_LEN + 1 + count * CELL_WIDTH as usize);
        out.push(self.phase.as_byte());
        out.push(self.current_player);
        out.push(count as u8);
        if count > 0 {
            out.push(CELL_WIDTH);
            for cell in &self.changed_cells {
                out.extend_from_slice(&[cell.column, cell.row, cell.stone]);
            }
        }
        Ok(out)
    }

    pub fn decode(buf: &[u8]) -> DecodeResult<Self> {
        require_len(Self::VARIANT, buf, ACTION_HEADER_LEN)?;

        let phase = parse_phase(buf[0])?;
        if !matches!(phase, Phase::Running | Phase::Finished) {
            return Err(DecodeError::UnexpectedPhase {
                variant: Self::VARIANT,
                phase,
            });
        }

        let count = buf[2] as usize;
        if count == 0 {
            reject_trailing(Self::VARIANT, buf, ACTION_HEADER_LEN)?;
            return Ok(Self::new(phase, buf[1], Vec::new()));
        }

        require_len(Self::VARIANT, buf, ACTION_HEADER_LEN + 1)?;
        let width = buf[ACTION_HEADER_LEN];
        if width != CELL_WIDTH {
            return Err(DecodeError::BadCellWidth(width));
        }

        let start = ACTION_HEADER_LEN + 1;
        let total = start + count * CELL_WIDTH as usize;
        require_len(Self::VARIANT, buf, total)?;
        reject_trailing(Self::VARIANT, buf, total)?;

        let changed_cells = buf[start..total]
            .chunks_exact(CELL_WIDTH as usize)
            .map(|triple| CellChange {
                column: triple[0],
                row: triple[1],
                stone: triple[2],
            })
            .collect();

        Ok(Self::new(phase, buf[1], changed_cells))
    }
}

impl Delta {
    pub fn phase(&self) -> Phase {
        match self {
            Delta::Init(d) => d.phase,
            Delta::Running(d) => d.phase,
            Delta::Action(d) => d.phase,
        }
    }

    /// Short variant name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Delta::Init(_) => InitDelta::VARIANT,
            Delta::Running(_) => RunningDelta::VARIANT,
            Delta::Action(_) => ActionDelta::VARIANT,
        }
    }

    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        match self {
            Delta::Init(d) => d.encode(),
            Delta::Running(d) => Ok(d.encode()),
            Delta::Action(d) => d.encode(),
        }
    }

    /// Decode any variant, dispatching on the leading phase byte.
    ///
    /// A lone `Running` byte is a [`RunningDelta`]; a longer buffer tagged
    /// `Running` or `Finished` is an [`ActionDelta`].
    pub fn decode(buf: &[u8]) -> DecodeResult<Self> {
        let first = *buf.first().ok_or(DecodeError::Empty)?;
        match parse_phase(first)? {
            Phase::None => Err(DecodeError::UnknownVariant(Phase::None)),
            Phase::Initialized => InitDelta::decode(buf).map(Delta::Init),
            Phase::Running if buf.len() == 1 => RunningDelta::decode(buf).map(Delta::Running),
            Phase::Running | Phase::Finished => ActionDelta::decode(buf).map(Delta::Action),
        }
    }
}

impl From<InitDelta> for Delta {
    fn from(delta: InitDelta) -> Self {
        Delta::Init(delta)
    }
}

impl From<RunningDelta> for Delta {
    fn from(delta: RunningDelta) -> Self {
        Delta::Running(delta)
    }
}

impl From<ActionDelta> for Delta {
    fn from(delta: ActionDelta) -> Self {
        Delta::Action(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_1: [u8; 4] = [11, 12, 13, 14];
    const PLAYER_2: [u8; 4] = [21, 22, 23, 24];

    fn roster() -> Vec<Vec<u8>> {
        vec![PLAYER_1.to_vec(), PLAYER_2.to_vec()]
    }

    #[test]
    fn test_init_layout() {
        let encoded = InitDelta::new(2, roster()).encode().unwrap();
        assert_eq!(
            encoded,
            vec![1, 2, 2, 4, 11, 12, 13, 14, 21, 22, 23, 24]
        );
        assert_eq!(InitDelta::decode(&encoded).unwrap().players, roster());
    }

    #[test]
    fn test_init_rejects_mixed_identity_lengths() {
        let delta = InitDelta::new(1, vec![vec![1, 2], vec![3]]);
        assert_eq!(
            delta.encode(),
            Err(EncodeError::MixedIdentityLength { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_action_rejects_too_many_cells() {
        let cells = vec![CellChange { column: 0, row: 0, stone: 1 }; 256];
        let delta = ActionDelta::new(Phase::Running, 1, cells);
        assert_eq!(delta.encode(), Err(EncodeError::TooManyCells(256)));

        let cells = vec![CellChange { column: 0, row: 0, stone: 1 }; 255];
        let encoded = ActionDelta::new(Phase::Running, 1, cells).encode().unwrap();
        assert_eq!(encoded[2], 255);
        assert_eq!(encoded.len(), ACTION_HEADER_LEN + 1 + 255 * CELL_WIDTH as usize);
    }

    #[test]
    fn test_init_truncated_tail() {
        let mut encoded = InitDelta::new(1, roster()).encode().unwrap();
        encoded.pop();
        assert_eq!(
            InitDelta::decode(&encoded),
            Err(DecodeError::Truncated {
                variant: "Init",
                needed: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn test_running_layout() {
        assert_eq!(RunningDelta::new().encode(), vec![2]);
        assert_eq!(RunningDelta::decode(&[2]), Ok(RunningDelta::new()));
        assert!(matches!(
            RunningDelta::decode(&[1]),
            Err(DecodeError::UnexpectedPhase { .. })
        ));
    }

    #[test]
    fn test_action_layout() {
        let delta = ActionDelta::new(
            Phase::Running,
            2,
            vec![CellChange { column: 3, row: 4, stone: 2 }],
        );
        let encoded = delta.encode().unwrap();
        assert_eq!(encoded, vec![2, 2, 1, 3, 3, 4, 2]);
        assert_eq!(ActionDelta::decode(&encoded), Ok(delta));
    }

    #[test]
    fn test_action_without_changes_omits_width() {
        let delta = ActionDelta::new(Phase::Finished, 1, Vec::new());
        let encoded = delta.encode().unwrap();
        assert_eq!(encoded, vec![3, 1, 0]);
        assert_eq!(ActionDelta::decode(&encoded), Ok(delta));
    }

    #[test]
    fn test_action_bad_cell_width() {
        assert_eq!(
            ActionDelta::decode(&[2, 1, 1, 4, 0, 5, 1, 0]),
            Err(DecodeError::BadCellWidth(4))
        );
    }

    #[test]
    fn test_action_declared_count_exceeds_buffer() {
        assert!(matches!(
            ActionDelta::decode(&[2, 1, 2, 3, 0, 5, 1]),
            Err(DecodeError::Truncated { needed: 10, actual: 7, .. })
        ));
    }

    #[test]
    fn test_dispatch_by_phase_and_length() {
        assert!(matches!(Delta::decode(&[2]), Ok(Delta::Running(_))));
        assert!(matches!(Delta::decode(&[2, 1, 0]), Ok(Delta::Action(_))));
        assert!(matches!(Delta::decode(&[3, 1, 0]), Ok(Delta::Action(_))));
        assert!(matches!(Delta::decode(&[1, 1, 0, 0]), Ok(Delta::Init(_))));
    }

    #[test]
    fn test_dispatch_rejects_unknown_tags() {
        assert_eq!(Delta::decode(&[]), Err(DecodeError::Empty));
        assert_eq!(Delta::decode(&[9, 0, 0]), Err(DecodeError::UnknownPhase(9)));
        assert_eq!(
            Delta::decode(&[0]),
            Err(DecodeError::UnknownVariant(Phase::None))
        );
        assert!(matches!(
            Delta::decode(&[3]),
            Err(DecodeError::Truncated { variant: "Action", .. })
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        assert!(matches!(
            Delta::decode(&[2, 1, 0, 0]),
            Err(DecodeError::TrailingBytes { variant: "Action", extra: 1 })
        ));
    }
}
