//! Game state machine for one Connect Four instance
//!
//! ```text
//! None --initialize--> Initialized --begin_running--> Running --execute_move(win | full)--> Finished
//!                                                     Running --execute_move(otherwise)--> Running
//! ```
//!
//! Lifecycle transitions (`initialize`, `begin_running`) are absorbed by
//! encoding their delta and passing it through [`GameEngine::apply_sync`],
//! the same path a remote replica uses. `execute_move` commits its working
//! board directly; applying the returned delta to a replica that held the
//! pre-move board yields the same state.

use crate::error::{EngineError, Result};
use crate::snapshot::Snapshot;
use fourfold_core::{Board, CellChange, Phase, COLUMNS, ROWS};
use fourfold_delta::{ActionDelta, Delta, InitDelta, RunningDelta};
use rand::{Rng, RngCore};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Opaque player identity, compared by exact byte equality
pub type PlayerId = Vec<u8>;

/// State owned by one replica of one game.
#[derive(Clone, Debug)]
pub struct GameEngine {
    game_id: Vec<u8>,
    board: Board,
    phase: Phase,
    players: Vec<PlayerId>,
    /// 1-based index into `players`; 0 before initialization
    current_player: u8,
}

impl GameEngine {
    pub fn new(game_id: impl Into<Vec<u8>>) -> Self {
        Self {
            game_id: game_id.into(),
            board: Board::new(),
            phase: Phase::None,
            players: Vec::new(),
            current_player: 0,
        }
    }

    pub fn game_id(&self) -> &[u8] {
        &self.game_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// The turn pointer
    pub fn current_player(&self) -> u8 {
        self.current_player
    }

    /// Identity of the player allowed to move next, if any
    pub fn current_player_id(&self) -> Option<&[u8]> {
        let index = usize::from(self.current_player).checked_sub(1)?;
        self.players.get(index).map(Vec::as_slice)
    }

    /// 1-based roster index of `identity`, or 0 when it is not on the roster.
    pub fn resolve_player(&self, identity: &[u8]) -> u8 {
        self.players
            .iter()
            .position(|p| p.as_slice() == identity)
            .map(|i| (i + 1) as u8)
            .unwrap_or(0)
    }

    fn require_phase(&self, operation: &'static str, expected: Phase) -> Result<()> {
        if self.phase != expected {
            return Err(EngineError::WrongPhase {
                operation,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Lifecycle transitions only take the single forward step to `next`.
    fn require_advance(&self, operation: &'static str, next: Phase) -> Result<()> {
        if !self.phase.can_advance_to(next) {
            return Err(EngineError::WrongPhase {
                operation,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Start a new game: draw the starting player from `rng`, then absorb
    /// the resulting [`InitDelta`] locally before handing it back for
    /// distribution.
    pub fn initialize<R>(&mut self, players: Vec<PlayerId>, rng: &mut R) -> Result<InitDelta>
    where
        R: RngCore + ?Sized,
    {
        self.require_advance("initialize", Phase::Initialized)?;
        validate_roster(&players).map_err(EngineError::InvalidRoster)?;

        let starting_player = rng.gen_range(1..=players.len()) as u8;
        let delta = InitDelta::new(starting_player, players);
        self.apply_sync(&delta.encode()?)?;

        debug!(
            players = delta.players.len(),
            starting_player, "game initialized"
        );
        Ok(delta)
    }

    /// Move from `Initialized` to `Running`.
    pub fn begin_running(&mut self) -> Result<RunningDelta> {
        self.require_advance("begin_running", Phase::Running)?;

        let delta = RunningDelta::new();
        self.apply_sync(&delta.encode())?;

        debug!(current_player = self.current_player, "game running");
        Ok(delta)
    }

    /// Check whether `player` may drop a stone into `column` right now.
    pub fn validate_move(&self, player: &[u8], column: u8) -> Result<()> {
        if usize::from(column) >= COLUMNS {
            return Err(EngineError::IllegalMove { column });
        }
        self.require_phase("validate_move", Phase::Running)?;

        let mover = self.resolve_player(player);
        if mover == 0 || mover != self.current_player {
            return Err(EngineError::WrongPlayer {
                expected: self.current_player,
                actual: mover,
            });
        }

        if !self.board.can_drop(usize::from(column)) {
            return Err(EngineError::IllegalMove { column });
        }
        Ok(())
    }

    /// Validate and execute a move, returning the delta other replicas
    /// need to follow it.
    pub fn execute_move(&mut self, player: &[u8], column: u8) -> Result<ActionDelta> {
        self.validate_move(player, column)?;

        let mover = self.current_player;
        let before = self.board;
        let mut after = before;
        if !after.drop_stone(usize::from(column), mover) {
            return Err(EngineError::IllegalMove { column });
        }

        let won = after.evaluate(mover);
        if won || after.is_full() {
            self.phase = Phase::Finished;
        } else {
            self.current_player = self.next_player();
        }

        let changed_cells = Board::diff(&before, &after);
        self.board = after;

        debug!(
            mover,
            column,
            won,
            phase = %self.phase,
            next = self.current_player,
            "move executed"
        );
        Ok(ActionDelta::new(self.phase, self.current_player, changed_cells))
    }

    fn next_player(&self) -> u8 {
        if usize::from(self.current_player) < self.players.len() {
            self.current_player + 1
        } else {
            1
        }
    }

    /// Decode `bytes` and merge the delta into this replica.
    pub fn apply_sync(&mut self, bytes: &[u8]) -> Result<()> {
        let delta = Delta::decode(bytes)?;
        self.apply_delta(&delta)
    }

    /// Merge an already decoded delta. Assumes deltas arrive in the order
    /// the originator produced them.
    ///
    /// The roster and turn pointer a delta carries are checked before
    /// anything is written; a rejected delta leaves the replica unchanged.
    pub fn apply_delta(&mut self, delta: &Delta) -> Result<()> {
        match delta {
            Delta::Init(init) => {
                validate_roster(&init.players).map_err(EngineError::RejectedRoster)?;
                check_turn(init.starting_player, init.players.len())?;
                self.board = Board::new();
                self.phase = init.phase;
                self.current_player = init.starting_player;
                self.players = init.players.clone();
            }
            Delta::Running(_) => {
                self.phase = Phase::Running;
            }
            Delta::Action(action) => {
                check_turn(action.current_player, self.players.len())?;
                check_cells(&action.changed_cells)?;
                self.phase = action.phase;
                self.current_player = action.current_player;
                for cell in &action.changed_cells {
                    self.board
                        .set(usize::from(cell.column), usize::from(cell.row), cell.stone);
                }
            }
        }

        trace!(
            kind = delta.kind(),
            phase = %self.phase,
            current_player = self.current_player,
            "delta applied"
        );
        Ok(())
    }

    /// Full-state view. Unavailable before initialization.
    pub fn snapshot_state(&self) -> Result<Snapshot> {
        if self.phase == Phase::None {
            return Err(EngineError::WrongPhase {
                operation: "snapshot_state",
                actual: self.phase,
            });
        }
        Ok(Snapshot::new(self.phase, self.current_player, &self.board))
    }

    /// True when board, turn pointer and phase all match.
    pub fn structurally_eq(&self, other: &GameEngine) -> bool {
        self.board == other.board
            && self.current_player == other.current_player
            && self.phase == other.phase
    }
}

fn validate_roster(players: &[PlayerId]) -> std::result::Result<(), String> {
    let first = players.first().ok_or_else(|| "roster is empty".to_string())?;

    if players.len() > usize::from(u8::MAX) {
        return Err(format!("{} players exceed the limit of 255", players.len()));
    }
    if first.is_empty() || first.len() > usize::from(u8::MAX) {
        return Err(format!("identity length {} is outside 1..=255", first.len()));
    }
    if players.iter().any(|p| p.len() != first.len()) {
        return Err("identities differ in length".to_string());
    }

    let unique: HashSet<&[u8]> = players.iter().map(Vec::as_slice).collect();
    if unique.len() != players.len() {
        return Err("duplicate identity".to_string());
    }
    Ok(())
}

/// The turn pointer must name a seat on the roster.
fn check_turn(current_player: u8, players: usize) -> Result<()> {
    if current_player == 0 || usize::from(current_player) > players {
        return Err(EngineError::TurnOutOfRange {
            current_player,
            players,
        });
    }
    Ok(())
}

fn check_cells(cells: &[CellChange]) -> Result<()> {
    for cell in cells {
        if usize::from(cell.column) >= COLUMNS || usize::from(cell.row) >= ROWS {
            return Err(EngineError::CellOutOfBounds {
                column: cell.column,
                row: cell.row,
            });
        }
    }
    Ok(())
}
