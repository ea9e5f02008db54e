//! Capability interface the enclosing host engine drives.
//!
//! The host owns message framing, transport and identity. It only sees
//! encoded delta payloads and snapshots coming out of this trait.

use crate::engine::{GameEngine, PlayerId};
use crate::error::Result;
use rand::RngCore;

pub trait HostEngine {
    /// Create the game for `players` and return the encoded Init delta.
    fn new_instance(&mut self, players: Vec<PlayerId>, rng: &mut dyn RngCore) -> Result<Vec<u8>>;

    /// Launch an initialized game and return the encoded Running delta.
    fn start(&mut self) -> Result<Vec<u8>>;

    fn validate_action(&self, player: &[u8], column: u8) -> Result<()>;

    /// Execute a move and return the encoded Action delta.
    fn execute_action(&mut self, player: &[u8], column: u8) -> Result<Vec<u8>>;

    /// Absorb a delta produced by any replica, including this one.
    fn synchronize_state(&mut self, delta: &[u8]) -> Result<()>;

    /// Encoded full-state snapshot.
    fn state(&self) -> Result<Vec<u8>>;

    /// Deltas produced by the passage of time. Connect Four has none.
    fn block_tick(&mut self) -> Vec<Vec<u8>> {
        Vec::new()
    }
}

impl HostEngine for GameEngine {
    fn new_instance(&mut self, players: Vec<PlayerId>, rng: &mut dyn RngCore) -> Result<Vec<u8>> {
        Ok(self.initialize(players, rng)?.encode()?)
    }

    fn start(&mut self) -> Result<Vec<u8>> {
        Ok(self.begin_running()?.encode())
    }

    fn validate_action(&self, player: &[u8], column: u8) -> Result<()> {
        self.validate_move(player, column)
    }

    fn execute_action(&mut self, player: &[u8], column: u8) -> Result<Vec<u8>> {
        Ok(self.execute_move(player, column)?.encode()?)
    }

    fn synchronize_state(&mut self, delta: &[u8]) -> Result<()> {
        self.apply_sync(delta)
    }

    fn state(&self) -> Result<Vec<u8>> {
        Ok(self.snapshot_state()?.to_bytes())
    }
}
